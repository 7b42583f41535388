//! # poseidon-grid
//!
//! Typed 2-D raster grid for the poseidon flood pipeline.
//!
//! A [`Grid`] couples an [`ndarray::Array2`] of cell values with the
//! georeference needed to place those cells on the ground: a
//! [`GridTransform`] (lower-left corner and square cell size), a [`Crs`]
//! tag, and a no-data sentinel. Rows run north to south, so row 0 is the
//! top of the raster; columns run west to east.
//!
//! The cell type is anything implementing [`CellValue`]. Implementations
//! are provided for `f64` (elevation and depth, where NaN always counts
//! as no-data), `i32` (land-cover codes) and `u8` (curve numbers).
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use poseidon_grid::{Crs, Grid, GridTransform};
//!
//! let transform = GridTransform::new(500_000.0, 2_400_000.0, 10.0)?;
//! let dem = Grid::new(
//!     transform,
//!     Crs::new("EPSG:32650"),
//!     -9999.0,
//!     array![[12.5, 11.0], [10.2, -9999.0]],
//! );
//!
//! assert_eq!(dem.value(0, 1), Some(11.0));
//! assert!(!dem.is_valid(1, 1));
//! // Centre of the south-west cell.
//! assert_eq!(dem.cell_center(1, 0), (500_005.0, 2_400_005.0));
//! # Ok::<(), poseidon_grid::GridError>(())
//! ```

mod crs;
mod error;
mod grid;
mod transform;

pub use crs::Crs;
pub use error::GridError;
pub use grid::{CellValue, Grid};
pub use transform::GridTransform;

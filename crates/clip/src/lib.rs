//! # poseidon-clip
//!
//! Cuts a watershed-sized window out of a city-wide raster.
//!
//! A [`Polygon`] is the footprint of one watershed: one or more rings in
//! map coordinates, with membership decided by even-odd parity so holes
//! and multi-part shapes need no special casing. [`clip_to_polygon`]
//! takes the smallest lattice-aligned window covering the footprint and
//! masks every cell whose centre falls outside it. The window grid keeps
//! the source's CRS, cell size and lattice, so clipped rasters can later
//! be placed back into a city-wide frame without resampling.
//!
//! A footprint that misses the raster entirely yields an empty (0 x 0)
//! window rather than an error; downstream code treats a windowless
//! watershed like any other watershed without valid cells.

mod clip;
mod error;
mod polygon;

pub use clip::clip_to_polygon;
pub use error::ClipError;
pub use polygon::Polygon;

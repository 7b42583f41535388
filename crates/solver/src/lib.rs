//! # poseidon-solver
//!
//! Static ("bathtub") inundation solver for a single micro-watershed.
//!
//! Given the watershed's clipped elevation raster and a runoff volume,
//! the solver finds the horizontal water surface that ponds exactly that
//! volume. The ponded volume below a surface at elevation `L` is
//!
//! ```text
//! V(L) = sum over valid cells with z < L of (L - z) * cell_area
//! ```
//!
//! which is continuous and non-decreasing in `L`, so [`solve_level`]
//! brackets the answer between the lowest and highest valid elevation
//! and bisects until the bracket is narrower than the configured
//! tolerance. Water never rises past the watershed rim: a volume the
//! basin cannot hold is reported as [`Outcome::RimLimited`] at the rim
//! elevation instead of an extrapolated surface.
//!
//! | Outcome | Meaning |
//! |---|---|
//! | [`Outcome::Solved`] | bracket narrowed below the tolerance |
//! | [`Outcome::RimLimited`] | target exceeds the basin capacity at the rim |
//! | [`Outcome::IterationLimit`] | iteration cap hit before the tolerance |
//! | [`Outcome::Degenerate`] | too few valid cells to pond anything |
//!
//! [`depth_grid`] turns a solved surface back into per-cell water depths
//! for rasterisation.

mod config;
mod depth;
mod error;
mod result;
mod solve;
mod volume;

pub use config::{
    SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_VALID_CELLS, DEFAULT_TOLERANCE_M,
};
pub use depth::depth_grid;
pub use error::SolverError;
pub use result::{LevelSolution, Outcome};
pub use solve::solve_level;
pub use volume::ponded_volume_m3;

//! Error types for the poseidon-clip crate.

use poseidon_grid::GridError;
use thiserror::Error;

/// Errors raised while building polygons or clipping rasters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// Returned when a polygon is built without any ring.
    #[error("polygon has no rings")]
    EmptyPolygon,

    /// Returned when a ring has too few vertices to enclose area.
    #[error("polygon ring {index} has {vertices} vertices, need at least 3")]
    ShortRing {
        /// Index of the offending ring.
        index: usize,
        /// Number of vertices it carries.
        vertices: usize,
    },

    /// Returned when a ring contains a NaN or infinite coordinate.
    #[error("polygon ring {index} contains a non-finite vertex")]
    NonFiniteVertex {
        /// Index of the offending ring.
        index: usize,
    },

    /// A grid-level failure while building the clip window.
    #[error(transparent)]
    Grid(#[from] GridError),
}

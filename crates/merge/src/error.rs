//! Error types for the poseidon-merge crate.

use poseidon_grid::GridError;
use thiserror::Error;

/// Errors raised while assembling a city-wide frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    /// Returned when a frame union is requested over zero tiles.
    #[error("no tiles to merge")]
    NoTiles,

    /// A tile failed the lattice or georeference checks.
    #[error(transparent)]
    Grid(#[from] GridError),
}

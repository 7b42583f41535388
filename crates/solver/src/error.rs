//! Error types for the poseidon-solver crate.

use thiserror::Error;

/// Errors raised while configuring or running the level solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Returned when the level tolerance is zero, negative or not
    /// finite.
    #[error("level tolerance must be a finite positive number of metres, got {value}")]
    InvalidTolerance {
        /// The offending tolerance in metres.
        value: f64,
    },

    /// Returned when the iteration cap is zero.
    #[error("max iterations must be at least 1")]
    ZeroMaxIterations,

    /// Returned when the valid-cell floor is zero; a watershed with no
    /// valid cells can never be solved, so the floor starts at 1.
    #[error("min valid cells must be at least 1")]
    ZeroMinValidCells,

    /// Returned when the target volume is negative or not finite.
    #[error("target volume {value} m^3 is not a non-negative finite number")]
    InvalidTargetVolume {
        /// The offending volume in m^3.
        value: f64,
    },
}

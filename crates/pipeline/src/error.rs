//! Error types for the poseidon-pipeline crate.

use poseidon_clip::ClipError;
use poseidon_grid::GridError;
use poseidon_scs::ScsError;
use poseidon_solver::SolverError;
use thiserror::Error;

/// Errors raised while preparing or running a simulation.
///
/// Failures scoped to a single watershed never surface here; they are
/// recorded on that watershed's [`WatershedRecord`](crate::WatershedRecord)
/// so one bad basin cannot sink a city-wide run. A `PipelineError`
/// always means the run as a whole is misconfigured or produced
/// something structurally impossible.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Returned when a scenario is declared with an empty name.
    #[error("scenario name is empty")]
    EmptyScenarioName,

    /// Returned when a scenario's storm depth is negative or not
    /// finite.
    #[error("storm depth {value} mm for scenario {name} is not a non-negative finite number")]
    InvalidStormDepth {
        /// The scenario in question.
        name: String,
        /// The offending depth in mm.
        value: f64,
    },

    /// A georeference or alignment failure.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A footprint failure.
    #[error(transparent)]
    Clip(#[from] ClipError),

    /// A curve-number or runoff failure.
    #[error(transparent)]
    Scs(#[from] ScsError),

    /// A level-solver failure.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// A raster store backend failed to produce a window. The in-memory
    /// catalog reports the precise variants above; this one carries
    /// whatever an external backend has to say.
    #[error("raster store: {message}")]
    Store {
        /// The backend's description of the failure.
        message: String,
    },

    /// A diagnostics document failed to serialise.
    #[error("failed to serialise diagnostics: {0}")]
    Diagnostics(#[from] serde_json::Error),
}

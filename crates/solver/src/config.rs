//! Solver configuration.

use crate::error::SolverError;

/// Default width of the level bracket at which bisection stops, in
/// metres. One millimetre of water surface is far below the vertical
/// accuracy of any urban elevation model.
pub const DEFAULT_TOLERANCE_M: f64 = 0.001;

/// Default cap on bisection iterations. Halving a bracket the height of
/// a mountain range down to a millimetre takes fewer than 30 steps, so
/// 64 only trips on pathological inputs.
pub const DEFAULT_MAX_ITERATIONS: u32 = 64;

/// Default minimum number of valid elevation cells a watershed needs
/// before the solver will attempt it.
pub const DEFAULT_MIN_VALID_CELLS: usize = 1;

/// Tuning knobs for the level search.
///
/// Build with [`SolverConfig::new`] and adjust through the `with_*`
/// methods:
///
/// ```
/// use poseidon_solver::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_tolerance_m(0.01)
///     .with_min_valid_cells(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    tolerance_m: f64,
    max_iterations: u32,
    min_valid_cells: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_valid_cells: DEFAULT_MIN_VALID_CELLS,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with the default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bracket width at which bisection stops, in metres.
    pub fn with_tolerance_m(mut self, tolerance_m: f64) -> Self {
        self.tolerance_m = tolerance_m;
        self
    }

    /// Sets the cap on bisection iterations.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the minimum number of valid cells a watershed needs before
    /// the solver will attempt it.
    pub fn with_min_valid_cells(mut self, min_valid_cells: usize) -> Self {
        self.min_valid_cells = min_valid_cells;
        self
    }

    /// The bracket width at which bisection stops, in metres.
    pub fn tolerance_m(&self) -> f64 {
        self.tolerance_m
    }

    /// The cap on bisection iterations.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The minimum number of valid cells required of a watershed.
    pub fn min_valid_cells(&self) -> usize {
        self.min_valid_cells
    }

    /// Checks the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the error for the first invalid field found.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.tolerance_m.is_finite() || self.tolerance_m <= 0.0 {
            return Err(SolverError::InvalidTolerance {
                value: self.tolerance_m,
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::ZeroMaxIterations);
        }
        if self.min_valid_cells == 0 {
            return Err(SolverError::ZeroMinValidCells);
        }
        Ok(())
    }
}

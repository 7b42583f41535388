//! Design-storm scenarios.

use crate::error::PipelineError;

/// One design storm to simulate, e.g. the 100-year storm under the 2021
/// drainage layout.
///
/// The name doubles as the suffix of every output file the scenario
/// produces, so it should be filesystem-friendly.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    storm_depth_mm: f64,
}

impl Scenario {
    /// Declares a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyScenarioName`] for a blank name and
    /// [`PipelineError::InvalidStormDepth`] when the depth is negative
    /// or not finite.
    pub fn new(name: impl Into<String>, storm_depth_mm: f64) -> Result<Self, PipelineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PipelineError::EmptyScenarioName);
        }
        if !storm_depth_mm.is_finite() || storm_depth_mm < 0.0 {
            return Err(PipelineError::InvalidStormDepth {
                name,
                value: storm_depth_mm,
            });
        }
        Ok(Self {
            name,
            storm_depth_mm,
        })
    }

    /// The scenario's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total storm depth in mm.
    pub fn storm_depth_mm(&self) -> f64 {
        self.storm_depth_mm
    }
}

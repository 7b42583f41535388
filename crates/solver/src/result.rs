//! Outcome of a level search.

use serde::{Deserialize, Serialize};

/// How a level search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The bracket narrowed below the tolerance; the reported level
    /// ponds the target volume.
    Solved,
    /// The target volume exceeds what the basin holds with the surface
    /// at its rim; the level is clamped to the rim elevation.
    RimLimited,
    /// The iteration cap was hit before the bracket narrowed below the
    /// tolerance.
    IterationLimit,
    /// The watershed has fewer valid cells than the configured floor,
    /// so there was nothing to solve.
    Degenerate,
}

/// A solved (or abandoned) water surface for one watershed.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSolution {
    level_m: f64,
    ponded_volume_m3: f64,
    target_volume_m3: f64,
    iterations: u32,
    outcome: Outcome,
}

impl LevelSolution {
    pub(crate) fn new(
        level_m: f64,
        ponded_volume_m3: f64,
        target_volume_m3: f64,
        iterations: u32,
        outcome: Outcome,
    ) -> Self {
        Self {
            level_m,
            ponded_volume_m3,
            target_volume_m3,
            iterations,
            outcome,
        }
    }

    /// Elevation of the water surface in metres. NaN only for a
    /// [`Outcome::Degenerate`] watershed without any valid cell.
    pub fn level_m(&self) -> f64 {
        self.level_m
    }

    /// Volume in m^3 actually ponded by the reported surface.
    pub fn ponded_volume_m3(&self) -> f64 {
        self.ponded_volume_m3
    }

    /// Volume in m^3 the search was asked to place.
    pub fn target_volume_m3(&self) -> f64 {
        self.target_volume_m3
    }

    /// Bisection iterations spent.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// How the search ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Ponded minus target volume in m^3; negative when the basin could
    /// not hold the full target.
    pub fn residual_m3(&self) -> f64 {
        self.ponded_volume_m3 - self.target_volume_m3
    }

    /// Whether the numeric search ran to completion. Rim-limited and
    /// degenerate watersheds count as converged; only the iteration cap
    /// marks a failure of the search itself.
    pub fn converged(&self) -> bool {
        !matches!(self.outcome, Outcome::IterationLimit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_iteration_limit_is_unconverged() {
        let solved = LevelSolution::new(2.5, 100.0, 100.0, 17, Outcome::Solved);
        let rim = LevelSolution::new(10.0, 400.0, 900.0, 0, Outcome::RimLimited);
        let capped = LevelSolution::new(2.5, 90.0, 100.0, 64, Outcome::IterationLimit);
        let degenerate = LevelSolution::new(f64::NAN, 0.0, 100.0, 0, Outcome::Degenerate);

        assert!(solved.converged());
        assert!(rim.converged());
        assert!(!capped.converged());
        assert!(degenerate.converged());
    }

    #[test]
    fn residual_is_negative_when_the_basin_overflows() {
        let rim = LevelSolution::new(10.0, 400.0, 900.0, 0, Outcome::RimLimited);
        assert_eq!(rim.residual_m3(), -500.0);
    }

    #[test]
    fn outcomes_serialise_as_snake_case() {
        let json = serde_json::to_string(&Outcome::RimLimited).unwrap();
        assert_eq!(json, "\"rim_limited\"");
        let back: Outcome = serde_json::from_str("\"iteration_limit\"").unwrap();
        assert_eq!(back, Outcome::IterationLimit);
    }
}

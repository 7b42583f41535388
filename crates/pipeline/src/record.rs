//! Per-watershed diagnostics records.

use poseidon_solver::{LevelSolution, Outcome};
use serde::Serialize;

/// How one watershed ended up, including failures the solver never saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WatershedStatus {
    /// Level search converged.
    Solved,
    /// Runoff exceeded the basin capacity; level clamped to the rim.
    RimLimited,
    /// Level search hit the iteration cap; the bracket midpoint was
    /// kept as the best estimate.
    Unconverged,
    /// Too few valid cells to solve.
    Degenerate,
    /// Processing failed before or during the solve; see the record's
    /// error message.
    Failed,
}

impl From<Outcome> for WatershedStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Solved => Self::Solved,
            Outcome::RimLimited => Self::RimLimited,
            Outcome::IterationLimit => Self::Unconverged,
            Outcome::Degenerate => Self::Degenerate,
        }
    }
}

/// One row of the diagnostics document.
///
/// Quantities that were never computed (a failed watershed, or the
/// level of a degenerate one) are `None` and serialise as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct WatershedRecord {
    /// Id from the watershed layer.
    pub watershed_id: String,
    /// Final status.
    pub status: WatershedStatus,
    /// Cells valid in both elevation and land cover.
    pub valid_cells: usize,
    /// Mean curve number over those cells.
    pub mean_curve_number: Option<f64>,
    /// Runoff depth fed to the solver, in mm.
    pub runoff_depth_mm: Option<f64>,
    /// Runoff volume the solver was asked to pond, in m^3.
    pub target_volume_m3: Option<f64>,
    /// Solved water surface elevation in metres.
    pub level_m: Option<f64>,
    /// Volume actually ponded at that level, in m^3.
    pub ponded_volume_m3: Option<f64>,
    /// Bisection iterations spent.
    pub iterations: u32,
    /// What went wrong, for failed watersheds.
    pub error: Option<String>,
}

impl WatershedRecord {
    /// Record for a watershed the solver ran on.
    pub(crate) fn from_solution(
        watershed_id: String,
        valid_cells: usize,
        mean_curve_number: f64,
        runoff_depth_mm: f64,
        solution: &LevelSolution,
    ) -> Self {
        let level = solution.level_m();
        Self {
            watershed_id,
            status: solution.outcome().into(),
            valid_cells,
            mean_curve_number: Some(mean_curve_number),
            runoff_depth_mm: Some(runoff_depth_mm),
            target_volume_m3: Some(solution.target_volume_m3()),
            level_m: level.is_finite().then_some(level),
            ponded_volume_m3: Some(solution.ponded_volume_m3()),
            iterations: solution.iterations(),
            error: None,
        }
    }

    /// Record for a watershed with no usable cells at all.
    pub(crate) fn empty(watershed_id: String) -> Self {
        Self {
            watershed_id,
            status: WatershedStatus::Degenerate,
            valid_cells: 0,
            mean_curve_number: None,
            runoff_depth_mm: None,
            target_volume_m3: None,
            level_m: None,
            ponded_volume_m3: None,
            iterations: 0,
            error: None,
        }
    }

    /// Record for a watershed whose processing failed.
    pub(crate) fn failed(watershed_id: String, error: String) -> Self {
        Self {
            watershed_id,
            status: WatershedStatus::Failed,
            valid_cells: 0,
            mean_curve_number: None,
            runoff_depth_mm: None,
            target_volume_m3: None,
            level_m: None,
            ponded_volume_m3: None,
            iterations: 0,
            error: Some(error),
        }
    }
}

/// Watershed tallies by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub solved: usize,
    pub rim_limited: usize,
    pub unconverged: usize,
    pub degenerate: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    /// Adds one watershed to its tally.
    pub fn add(&mut self, status: WatershedStatus) {
        match status {
            WatershedStatus::Solved => self.solved += 1,
            WatershedStatus::RimLimited => self.rim_limited += 1,
            WatershedStatus::Unconverged => self.unconverged += 1,
            WatershedStatus::Degenerate => self.degenerate += 1,
            WatershedStatus::Failed => self.failed += 1,
        }
    }

    /// Total watersheds tallied.
    pub fn total(&self) -> usize {
        self.solved + self.rim_limited + self.unconverged + self.degenerate + self.failed
    }
}

#[cfg(test)]
mod tests {
    use poseidon_solver::Outcome;

    use super::*;

    #[test]
    fn statuses_map_from_solver_outcomes() {
        assert_eq!(WatershedStatus::from(Outcome::Solved), WatershedStatus::Solved);
        assert_eq!(
            WatershedStatus::from(Outcome::RimLimited),
            WatershedStatus::RimLimited
        );
        assert_eq!(
            WatershedStatus::from(Outcome::IterationLimit),
            WatershedStatus::Unconverged
        );
        assert_eq!(
            WatershedStatus::from(Outcome::Degenerate),
            WatershedStatus::Degenerate
        );
    }

    #[test]
    fn counts_tally_by_status() {
        let mut counts = OutcomeCounts::default();
        counts.add(WatershedStatus::Solved);
        counts.add(WatershedStatus::Solved);
        counts.add(WatershedStatus::Failed);
        counts.add(WatershedStatus::Degenerate);

        assert_eq!(counts.solved, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.degenerate, 1);
        assert_eq!(counts.rim_limited, 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn records_serialise_with_snake_case_status() {
        let record = WatershedRecord::failed("ws-1".to_string(), "boom".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["mean_curve_number"], serde_json::Value::Null);

        let status = serde_json::to_value(WatershedStatus::Unconverged).unwrap();
        assert_eq!(status, "unconverged");
    }
}

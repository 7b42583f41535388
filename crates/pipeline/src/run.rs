//! Scenario execution.

use poseidon_grid::Grid;
use poseidon_io::WatershedFeature;
use poseidon_merge::{MergeBuffer, OverlapPolicy};
use poseidon_scs::CnTable;
use poseidon_solver::SolverConfig;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::PipelineError;
use crate::process::{process_watershed, WatershedOutput, DEPTH_NODATA};
use crate::record::{OutcomeCounts, WatershedRecord};
use crate::scenario::Scenario;
use crate::store::RasterStore;

/// Knobs for scenario execution.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    solver: SolverConfig,
    overlap: OverlapPolicy,
    keep_tiles: bool,
}

impl RunOptions {
    /// Default options: default solver tuning, deepest-water overlap
    /// handling, tiles dropped after compositing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver tuning.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the overlap policy used while compositing.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Keeps per-watershed tiles in the result so they can be written
    /// to disk; off by default to save memory on city-scale runs.
    pub fn with_keep_tiles(mut self, keep_tiles: bool) -> Self {
        self.keep_tiles = keep_tiles;
        self
    }

    /// The solver tuning.
    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    /// The overlap policy.
    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Whether per-watershed tiles are kept.
    pub fn keep_tiles(&self) -> bool {
        self.keep_tiles
    }
}

/// Everything one scenario produced.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    merged: Grid<f64>,
    tiles: Vec<(String, Grid<f64>)>,
    summary: ScenarioSummary,
}

impl ScenarioRun {
    /// The city-wide merged depth raster.
    pub fn merged(&self) -> &Grid<f64> {
        &self.merged
    }

    /// Per-watershed tiles, empty unless the run kept them.
    pub fn tiles(&self) -> &[(String, Grid<f64>)] {
        &self.tiles
    }

    /// The scenario's diagnostics.
    pub fn summary(&self) -> &ScenarioSummary {
        &self.summary
    }

    /// Decomposes into `(merged, tiles, summary)` for writing.
    pub fn into_parts(self) -> (Grid<f64>, Vec<(String, Grid<f64>)>, ScenarioSummary) {
        (self.merged, self.tiles, self.summary)
    }
}

/// Diagnostics for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    /// Scenario name.
    pub scenario: String,
    /// Storm depth in mm.
    pub storm_depth_mm: f64,
    /// Watersheds attempted.
    pub watersheds: usize,
    /// Tallies by final status.
    pub counts: OutcomeCounts,
    /// Frame cells written by more than one watershed.
    pub overlapped_cells: u64,
    /// Merged cells with water standing on them.
    pub wet_cells: usize,
    /// Deepest water anywhere in the merged raster, in metres.
    pub max_depth_m: f64,
    /// One record per watershed, in input order.
    pub records: Vec<WatershedRecord>,
}

/// Diagnostics for a whole run, one entry per scenario.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Scenario summaries in execution order.
    pub scenarios: Vec<ScenarioSummary>,
}

impl RunSummary {
    /// Wraps scenario summaries into one document.
    pub fn new(scenarios: Vec<ScenarioSummary>) -> Self {
        Self { scenarios }
    }

    /// Renders the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Diagnostics`] when serialisation fails.
    pub fn to_pretty_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs one scenario over every watershed and composites the results
/// into a city-wide depth raster.
///
/// Watersheds are independent, so they are processed in parallel;
/// compositing afterwards is sequential and follows input order, which
/// is what makes the last-wins overlap policy deterministic.
///
/// # Errors
///
/// Returns a [`PipelineError`] for structural problems only: an invalid
/// solver configuration, or a tile that does not fit the frame it was
/// cut from. Per-watershed failures land in the records instead.
#[instrument(skip_all, fields(scenario = %scenario.name(), watersheds = watersheds.len()))]
pub fn run_scenario<S: RasterStore + ?Sized>(
    store: &S,
    cn_table: &CnTable,
    watersheds: &[WatershedFeature],
    scenario: &Scenario,
    options: &RunOptions,
) -> Result<ScenarioRun, PipelineError> {
    options.solver().validate()?;

    let outputs: Vec<WatershedOutput> = watersheds
        .par_iter()
        .map(|watershed| {
            process_watershed(
                store,
                cn_table,
                watershed,
                scenario.storm_depth_mm(),
                options.solver(),
            )
        })
        .collect();

    let mut buffer = MergeBuffer::new(store.empty_frame(DEPTH_NODATA), options.overlap());

    let mut counts = OutcomeCounts::default();
    let mut records = Vec::with_capacity(outputs.len());
    let mut tiles = Vec::new();
    for output in outputs {
        counts.add(output.record.status);
        if let Some(tile) = output.tile {
            buffer.composite(&tile)?;
            if options.keep_tiles() {
                tiles.push((output.record.watershed_id.clone(), tile));
            }
        }
        records.push(output.record);
    }

    let overlapped_cells = buffer.overlapped_cells();
    let merged = buffer.finish();
    let mut wet_cells = 0;
    let mut max_depth_m = 0.0_f64;
    for depth in merged.valid_values() {
        if depth > 0.0 {
            wet_cells += 1;
        }
        max_depth_m = max_depth_m.max(depth);
    }

    info!(
        solved = counts.solved,
        rim_limited = counts.rim_limited,
        unconverged = counts.unconverged,
        degenerate = counts.degenerate,
        failed = counts.failed,
        wet_cells,
        max_depth_m,
        "scenario complete"
    );

    let summary = ScenarioSummary {
        scenario: scenario.name().to_string(),
        storm_depth_mm: scenario.storm_depth_mm(),
        watersheds: watersheds.len(),
        counts,
        overlapped_cells,
        wet_cells,
        max_depth_m,
        records,
    };
    Ok(ScenarioRun {
        merged,
        tiles,
        summary,
    })
}

//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use poseidon_merge::OverlapPolicy;
use poseidon_pipeline::{RunOptions, Scenario};
use poseidon_scs::CnTable;
use poseidon_solver::SolverConfig;

use crate::config::*;

/// Parses an overlap policy name string into the corresponding enum variant.
pub fn parse_overlap(s: &str) -> Result<OverlapPolicy> {
    match s.to_lowercase().as_str() {
        "max" => Ok(OverlapPolicy::Max),
        "last_wins" | "last-wins" => Ok(OverlapPolicy::LastWins),
        other => bail!("unknown overlap policy: {other:?}"),
    }
}

/// Builds a [`CnTable`] from the TOML curve-number configuration.
///
/// Exactly one of `classes` or `direct` must be set: a class table
/// translates land-cover codes, `direct` declares that the land-cover
/// raster already holds curve numbers.
pub fn build_cn_table(cn: &CurveNumberToml) -> Result<CnTable> {
    match (cn.direct, cn.classes.is_empty()) {
        (true, true) => Ok(CnTable::identity()),
        (false, false) => Ok(CnTable::new(cn.classes.iter().copied())?),
        (true, false) => {
            bail!("curve numbers must have exactly one of classes or direct, got both")
        }
        (false, true) => {
            bail!("curve numbers must have exactly one of classes or direct, got neither")
        }
    }
}

/// Builds a [`SolverConfig`] from the TOML solver configuration.
pub fn build_solver_config(solver: &SolverToml) -> SolverConfig {
    SolverConfig::new()
        .with_tolerance_m(solver.tolerance_m)
        .with_max_iterations(solver.max_iterations)
        .with_min_valid_cells(solver.min_valid_cells)
}

/// Builds [`RunOptions`] from the TOML solver, merge and output
/// settings. Tiles are kept in memory only when they are going to be
/// written out.
pub fn build_run_options(config: &PoseidonConfig) -> Result<RunOptions> {
    let overlap = parse_overlap(&config.merge.overlap)?;
    Ok(RunOptions::new()
        .with_solver(build_solver_config(&config.solver))
        .with_overlap(overlap)
        .with_keep_tiles(config.outputs.write_watershed_grids))
}

/// Builds a [`Scenario`] from one TOML scenario entry.
pub fn build_scenario(scenario: &ScenarioToml) -> Result<Scenario> {
    Ok(Scenario::new(scenario.name.as_str(), scenario.rainfall_mm)?)
}

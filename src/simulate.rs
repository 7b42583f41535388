//! Simulate command: run every configured design storm over the watersheds.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use poseidon_grid::Crs;
use poseidon_io::{
    IoError, WatershedFeature, read_ascii_grid, read_watersheds, tile_file_name, write_ascii_grid,
};
use poseidon_pipeline::{GridCatalog, OutcomeCounts, RunSummary, VectorStore, run_scenario};

use crate::cli::SimulateArgs;
use crate::config::{PoseidonConfig, ScenarioToml};
use crate::convert;

/// GeoJSON-backed watershed source.
struct GeoJsonWatersheds {
    path: PathBuf,
    id_field: String,
}

impl VectorStore for GeoJsonWatersheds {
    type Error = IoError;

    fn watersheds(&self) -> Result<Vec<WatershedFeature>, IoError> {
        read_watersheds(&self.path, &self.id_field)
    }
}

/// Run the full simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    // 1. Load project TOML
    let toml_str = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PoseidonConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Resolve paths and scenario selection
    let elevation_path = config
        .inputs
        .elevation
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no elevation path: set [inputs].elevation in config"))?;
    let watershed_path = config
        .inputs
        .watersheds
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no watershed path: set [inputs].watersheds in config"))?;
    let output_dir = args.output.unwrap_or_else(|| config.outputs.dir.clone());
    let scenarios = select_scenarios(&config.scenarios, args.scenario.as_deref())?;

    // 3. Build run options and the curve-number table
    let options = convert::build_run_options(&config)?;
    let cn_table = convert::build_cn_table(&config.curve_numbers)?;

    // 4. Configure the worker pool
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    // 5. Read city-wide inputs
    let crs = Crs::new(config.inputs.crs.as_str());

    info!(path = %elevation_path.display(), "reading elevation");
    let dem = read_ascii_grid::<f64>(elevation_path, crs.clone())
        .with_context(|| format!("failed to read elevation: {}", elevation_path.display()))?;
    info!(
        rows = dem.rows(),
        cols = dem.cols(),
        valid = dem.valid_count(),
        "elevation loaded"
    );

    info!(path = %watershed_path.display(), "reading watersheds");
    let vector_store = GeoJsonWatersheds {
        path: watershed_path.clone(),
        id_field: config.inputs.id_field.clone(),
    };
    let watersheds = vector_store
        .watersheds()
        .with_context(|| format!("failed to read watersheds: {}", watershed_path.display()))?;
    if watersheds.is_empty() {
        bail!("watershed layer {} has no features", watershed_path.display());
    }
    info!(n_watersheds = watersheds.len(), "watersheds loaded");

    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    // 6. Run each scenario: same terrain, that scenario's land cover
    let mut summaries = Vec::with_capacity(scenarios.len());
    for scenario_toml in scenarios {
        let scenario = convert::build_scenario(scenario_toml)?;

        info!(
            scenario = scenario.name(),
            path = %scenario_toml.land_cover.display(),
            "reading land cover"
        );
        let land_cover = read_ascii_grid::<i32>(&scenario_toml.land_cover, crs.clone())
            .with_context(|| {
                format!(
                    "failed to read land cover: {}",
                    scenario_toml.land_cover.display()
                )
            })?;
        let catalog = GridCatalog::new(dem.clone(), land_cover).with_context(|| {
            format!(
                "land cover {} is not on the elevation grid",
                scenario_toml.land_cover.display()
            )
        })?;

        let run = run_scenario(&catalog, &cn_table, &watersheds, &scenario, &options)
            .with_context(|| format!("scenario {} failed", scenario.name()))?;
        let (merged, tiles, summary) = run.into_parts();

        let merged_path = output_dir.join(format!("flood_depth_{}.asc", scenario.name()));
        write_ascii_grid(&merged_path, &merged)
            .with_context(|| format!("failed to write merged raster: {}", merged_path.display()))?;
        info!(
            path = %merged_path.display(),
            wet_cells = summary.wet_cells,
            max_depth_m = summary.max_depth_m,
            "merged raster written"
        );

        for (id, tile) in &tiles {
            let tile_path = output_dir.join(tile_file_name(id, scenario.name()));
            write_ascii_grid(&tile_path, tile)
                .with_context(|| format!("failed to write tile: {}", tile_path.display()))?;
        }
        if !tiles.is_empty() {
            info!(n_tiles = tiles.len(), "watershed tiles written");
        }

        summaries.push(summary);
    }

    // 7. Write diagnostics JSON and close with the run totals
    let mut totals = OutcomeCounts::default();
    for summary in &summaries {
        totals.solved += summary.counts.solved;
        totals.rim_limited += summary.counts.rim_limited;
        totals.unconverged += summary.counts.unconverged;
        totals.degenerate += summary.counts.degenerate;
        totals.failed += summary.counts.failed;
    }

    let run_summary = RunSummary::new(summaries);
    let diag_path = output_dir.join("diagnostics.json");
    let json = run_summary
        .to_pretty_json()
        .context("failed to serialise diagnostics")?;
    fs::write(&diag_path, &json)
        .with_context(|| format!("failed to write diagnostics: {}", diag_path.display()))?;
    info!(path = %diag_path.display(), "diagnostics written");

    info!(
        scenarios = run_summary.scenarios.len(),
        solved = totals.solved,
        rim_limited = totals.rim_limited,
        unconverged = totals.unconverged,
        degenerate = totals.degenerate,
        failed = totals.failed,
        "simulation complete"
    );

    Ok(())
}

/// Restricts the configured scenarios to the CLI selection, if any.
fn select_scenarios<'a>(
    scenarios: &'a [ScenarioToml],
    selected: Option<&str>,
) -> Result<Vec<&'a ScenarioToml>> {
    if scenarios.is_empty() {
        bail!("no scenarios: add at least one [[scenarios]] entry to the config");
    }
    let mut seen = BTreeSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name.as_str()) {
            bail!("duplicate scenario name: {:?}", scenario.name);
        }
    }
    match selected {
        None => Ok(scenarios.iter().collect()),
        Some(name) => {
            let found: Vec<&ScenarioToml> =
                scenarios.iter().filter(|s| s.name == name).collect();
            if found.is_empty() {
                let available: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
                bail!("scenario {name:?} not found in config (available: {available:?})");
            }
            Ok(found)
        }
    }
}

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Poseidon configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseidonConfig {
    /// Worker threads for the watershed pool; 0 uses the rayon default.
    #[serde(default)]
    pub threads: usize,

    /// Input settings.
    #[serde(default)]
    pub inputs: InputsToml,

    /// Output settings.
    #[serde(default)]
    pub outputs: OutputsToml,

    /// Level-solver settings.
    #[serde(default)]
    pub solver: SolverToml,

    /// Merge settings.
    #[serde(default)]
    pub merge: MergeToml,

    /// Land-cover to curve-number translation.
    #[serde(default)]
    pub curve_numbers: CurveNumberToml,

    /// Design storms to simulate.
    #[serde(default)]
    pub scenarios: Vec<ScenarioToml>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InputsToml {
    /// City-wide elevation raster (.asc).
    pub elevation: Option<PathBuf>,
    /// Watershed footprints (GeoJSON FeatureCollection).
    pub watersheds: Option<PathBuf>,
    /// Feature property holding the watershed id.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Coordinate reference system label all inputs share.
    #[serde(default = "default_crs")]
    pub crs: String,
}

fn default_id_field() -> String {
    "HYBAS_ID".to_string()
}
fn default_crs() -> String {
    "LOCAL".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputsToml {
    /// Directory merged rasters and diagnostics are written into.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Also write one depth tile per watershed.
    #[serde(default)]
    pub write_watershed_grids: bool,
}

impl Default for OutputsToml {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_watershed_grids: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverToml {
    /// Water-level bracket width at which the search stops, in metres.
    #[serde(default = "default_tolerance_m")]
    pub tolerance_m: f64,
    /// Bisection iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Fewest valid cells a watershed needs to be solvable.
    #[serde(default = "default_min_valid_cells")]
    pub min_valid_cells: usize,
}

impl Default for SolverToml {
    fn default() -> Self {
        Self {
            tolerance_m: default_tolerance_m(),
            max_iterations: default_max_iterations(),
            min_valid_cells: default_min_valid_cells(),
        }
    }
}

fn default_tolerance_m() -> f64 {
    poseidon_solver::DEFAULT_TOLERANCE_M
}
fn default_max_iterations() -> u32 {
    poseidon_solver::DEFAULT_MAX_ITERATIONS
}
fn default_min_valid_cells() -> usize {
    poseidon_solver::DEFAULT_MIN_VALID_CELLS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeToml {
    /// Overlap policy for cells claimed by several watersheds
    /// ("max" or "last_wins").
    #[serde(default = "default_overlap")]
    pub overlap: String,
}

impl Default for MergeToml {
    fn default() -> Self {
        Self {
            overlap: default_overlap(),
        }
    }
}

fn default_overlap() -> String {
    "max".to_string()
}

/// Curve-number source. Exactly one of `classes` or `direct` should be
/// set.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CurveNumberToml {
    /// `[class, curve_number]` pairs translating land-cover codes.
    #[serde(default)]
    pub classes: Vec<(i32, u8)>,
    /// The land-cover raster already holds curve numbers.
    #[serde(default)]
    pub direct: bool,
}

/// One design storm.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioToml {
    /// Scenario name, used in output file names.
    pub name: String,
    /// Design-storm rainfall depth in mm.
    pub rainfall_mm: f64,
    /// Land-cover raster for this scenario (.asc).
    pub land_cover: PathBuf,
}

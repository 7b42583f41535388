//! # poseidon-pipeline
//!
//! Per-watershed flood simulation and city-wide compositing.
//!
//! ## Scenario Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["DEM + land cover"] -->|"clip per watershed"| B["watershed grids"]
//!     B -->|"curve numbers + runoff"| C["target volume"]
//!     C -->|"level search"| D["depth tile"]
//!     D -->|"composite"| E["merged raster"]
//!     E --> F["ScenarioSummary"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use poseidon_pipeline::{run_scenario, GridCatalog, RunOptions, Scenario};
//!
//! let catalog = GridCatalog::new(dem, land_cover)?;
//! let scenario = Scenario::new("2021_100yr", 297.343)?;
//! let run = run_scenario(&catalog, &cn_table, &watersheds, &scenario, &RunOptions::new())?;
//! let (merged, _tiles, summary) = run.into_parts();
//! ```
//!
//! Watersheds are independent and run in parallel; a watershed that
//! fails (an unmapped land-cover code, say) becomes a `failed` record
//! in the summary instead of aborting the scenario.
//!
//! Rasters reach the per-watershed maths only through the
//! [`RasterStore`] seam and watershed footprints through
//! [`VectorStore`]; [`GridCatalog`] is the in-memory raster store
//! backed by two full-extent grids.

mod catalog;
mod error;
mod process;
mod record;
mod run;
mod scenario;
mod store;

pub use catalog::GridCatalog;
pub use error::PipelineError;
pub use process::{process_watershed, WatershedOutput, DEPTH_NODATA};
pub use record::{OutcomeCounts, WatershedRecord, WatershedStatus};
pub use run::{run_scenario, RunOptions, RunSummary, ScenarioRun, ScenarioSummary};
pub use scenario::Scenario;
pub use store::{RasterStore, VectorStore};

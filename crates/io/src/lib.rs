//! # poseidon-io
//!
//! File formats at the edge of the poseidon pipeline.
//!
//! | Module | Format |
//! |---|---|
//! | [`ascii`] | ESRI ASCII grids (`.asc`) for elevation, land cover and depth rasters |
//! | [`geojson`] | GeoJSON FeatureCollections of watershed polygons |
//! | [`tiles`] | Naming and discovery of per-watershed depth tiles |
//!
//! ASCII grids carry no reference system of their own, so the readers
//! take the [`Crs`](poseidon_grid::Crs) the caller knows the data to be
//! in; everything read in one run should be tagged with the same CRS so
//! the alignment checks can do their work.

pub mod ascii;
mod error;
pub mod geojson;
pub mod tiles;

pub use ascii::{read_ascii_grid, write_ascii_grid, AsciiValue};
pub use error::IoError;
pub use geojson::{read_watersheds, WatershedFeature};
pub use tiles::{find_tiles, tile_file_name};

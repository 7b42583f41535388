//! Collaborator seams between the pipeline and its data sources.

use std::convert::Infallible;

use poseidon_grid::Grid;
use poseidon_io::WatershedFeature;

use crate::error::PipelineError;

/// Source of per-watershed raster windows.
///
/// The per-watershed maths reads everything through this seam and never
/// touches city-wide grids or geoprocessing directly, so a tiled or
/// out-of-core backend only has to hand out clipped windows. A store
/// serves one scenario; scenario-dependent land cover is handled by
/// constructing one store per scenario.
pub trait RasterStore: Sync {
    /// Elevation clipped to the watershed footprint, cells outside the
    /// footprint set to no-data.
    fn clipped_elevation(&self, watershed: &WatershedFeature) -> Result<Grid<f64>, PipelineError>;

    /// Land cover clipped to the watershed footprint.
    fn clipped_land_cover(&self, watershed: &WatershedFeature)
        -> Result<Grid<i32>, PipelineError>;

    /// Ground area of one cell in m^2.
    fn cell_area_m2(&self) -> f64;

    /// An all-no-data grid covering the whole modelling domain, ready
    /// for depth tiles to be composited into.
    fn empty_frame(&self, nodata: f64) -> Grid<f64>;
}

/// Source of watershed footprints.
pub trait VectorStore {
    /// The backend's failure mode.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every watershed in the layer, in a stable order.
    fn watersheds(&self) -> Result<Vec<WatershedFeature>, Self::Error>;
}

/// An already-loaded watershed list is its own store.
impl VectorStore for Vec<WatershedFeature> {
    type Error = Infallible;

    fn watersheds(&self) -> Result<Vec<WatershedFeature>, Infallible> {
        Ok(self.clone())
    }
}

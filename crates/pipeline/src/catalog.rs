//! The city-wide input rasters.

use poseidon_clip::clip_to_polygon;
use poseidon_grid::Grid;
use poseidon_io::WatershedFeature;

use crate::error::PipelineError;
use crate::store::RasterStore;

/// In-memory [`RasterStore`]: the full-extent elevation and land-cover
/// rasters a scenario draws from, checked once at construction to cover
/// exactly the same cells.
///
/// Every watershed window is cut from these two grids, so validating
/// alignment here means per-watershed processing never has to.
#[derive(Debug, Clone)]
pub struct GridCatalog {
    dem: Grid<f64>,
    land_cover: Grid<i32>,
}

impl GridCatalog {
    /// Pairs the two input rasters.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`GridError`](poseidon_grid::GridError)
    /// when the rasters differ in CRS, cell size, origin or shape.
    pub fn new(dem: Grid<f64>, land_cover: Grid<i32>) -> Result<Self, PipelineError> {
        dem.ensure_aligned(&land_cover)?;
        Ok(Self { dem, land_cover })
    }

    /// The city-wide elevation raster.
    pub fn dem(&self) -> &Grid<f64> {
        &self.dem
    }

    /// The city-wide land-cover raster.
    pub fn land_cover(&self) -> &Grid<i32> {
        &self.land_cover
    }
}

impl RasterStore for GridCatalog {
    fn clipped_elevation(&self, watershed: &WatershedFeature) -> Result<Grid<f64>, PipelineError> {
        Ok(clip_to_polygon(&self.dem, watershed.polygon())?)
    }

    fn clipped_land_cover(
        &self,
        watershed: &WatershedFeature,
    ) -> Result<Grid<i32>, PipelineError> {
        Ok(clip_to_polygon(&self.land_cover, watershed.polygon())?)
    }

    fn cell_area_m2(&self) -> f64 {
        self.dem.transform().cell_area()
    }

    fn empty_frame(&self, nodata: f64) -> Grid<f64> {
        Grid::all_nodata(
            *self.dem.transform(),
            self.dem.crs().clone(),
            nodata,
            self.dem.rows(),
            self.dem.cols(),
        )
    }
}

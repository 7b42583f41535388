//! Water depth rasterisation.

use ndarray::Array2;
use poseidon_grid::Grid;

/// Per-cell water depth in metres under a surface at `level_m`.
///
/// The result carries the elevation grid's georeference and no-data
/// sentinel. Valid cells at or above the surface get a depth of exactly
/// 0.0; no-data cells stay no-data. `level_m` must be finite; degenerate
/// watersheds have no surface and no depth raster.
pub fn depth_grid(dem: &Grid<f64>, level_m: f64) -> Grid<f64> {
    let nodata = dem.nodata();
    let (rows, cols) = dem.shape();
    let mut data = Array2::from_elem((rows, cols), nodata);
    for row in 0..rows {
        for col in 0..cols {
            if let Some(z) = dem.value(row, col) {
                data[[row, col]] = if z < level_m { level_m - z } else { 0.0 };
            }
        }
    }
    Grid::new(*dem.transform(), dem.crs().clone(), nodata, data)
}

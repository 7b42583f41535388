//! Ponded volume under a horizontal water surface.

use poseidon_grid::{CellValue, Grid};

/// Volume of water in m^3 held by `dem` when the water surface stands at
/// `level_m`.
///
/// Only valid cells strictly below the surface hold water; each
/// contributes its submersion depth times the cell's ground area. The
/// result is continuous and non-decreasing in `level_m`, which is what
/// lets the level search bisect on it.
pub fn ponded_volume_m3(dem: &Grid<f64>, level_m: f64) -> f64 {
    let nodata = dem.nodata();
    let cell_area = dem.transform().cell_area();
    let depth_sum: f64 = dem
        .data()
        .iter()
        .filter(|&&z| !z.is_nodata(nodata) && z < level_m)
        .map(|&z| level_m - z)
        .sum();
    depth_sum * cell_area
}

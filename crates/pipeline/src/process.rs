//! Processing of a single watershed.

use poseidon_grid::{CellValue, Grid};
use poseidon_io::WatershedFeature;
use poseidon_scs::{mean_curve_number, runoff_depth_mm, runoff_volume_m3, CnTable};
use poseidon_solver::{depth_grid, solve_level, Outcome, SolverConfig};
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::record::WatershedRecord;
use crate::store::RasterStore;

/// No-data sentinel shared by depth tiles, merged frames and the files
/// they are written to.
pub const DEPTH_NODATA: f64 = -9999.0;

/// One watershed's contribution to a scenario: its depth tile, when a
/// water surface exists, and its diagnostics record.
#[derive(Debug, Clone)]
pub struct WatershedOutput {
    /// Depth tile on the city lattice. Absent for degenerate and failed
    /// watersheds; present and all dry for a solved zero-runoff one.
    pub tile: Option<Grid<f64>>,
    /// Diagnostics record.
    pub record: WatershedRecord,
}

/// Runs the full chain for one watershed: fetch both clipped rasters
/// from the store, translate land cover to curve numbers, turn the
/// storm into a runoff volume, solve the water surface and rasterise
/// depths.
///
/// This never fails. Anything that goes wrong inside the watershed is
/// folded into a failed record so one bad basin cannot sink a city-wide
/// run; only structural problems (a misconfigured solver, rasters that
/// stopped lining up) surface as errors, and those are caught before
/// scenarios start.
pub fn process_watershed<S: RasterStore + ?Sized>(
    store: &S,
    cn_table: &CnTable,
    watershed: &WatershedFeature,
    storm_depth_mm: f64,
    solver: &SolverConfig,
) -> WatershedOutput {
    match try_process(store, cn_table, watershed, storm_depth_mm, solver) {
        Ok(output) => output,
        Err(error) => {
            warn!(watershed = watershed.id(), %error, "watershed failed");
            WatershedOutput {
                tile: None,
                record: WatershedRecord::failed(watershed.id().to_string(), error.to_string()),
            }
        }
    }
}

fn try_process<S: RasterStore + ?Sized>(
    store: &S,
    cn_table: &CnTable,
    watershed: &WatershedFeature,
    storm_depth_mm: f64,
    solver: &SolverConfig,
) -> Result<WatershedOutput, PipelineError> {
    let id = watershed.id();

    let mut dem = store.clipped_elevation(watershed)?;
    let land_cover = store.clipped_land_cover(watershed)?;
    dem.ensure_aligned(&land_cover)?;

    // Runoff area and ponding surface both use only cells valid in
    // both rasters.
    mask_missing(&mut dem, &land_cover);
    let mut curve_numbers = cn_table.map_curve_numbers(&land_cover)?;
    mask_missing(&mut curve_numbers, &dem);

    let valid_cells = dem.valid_count();
    let Some(mean_cn) = mean_curve_number(&curve_numbers) else {
        debug!(watershed = id, "no cells valid in both rasters");
        return Ok(WatershedOutput {
            tile: None,
            record: WatershedRecord::empty(id.to_string()),
        });
    };

    let runoff_mm = runoff_depth_mm(storm_depth_mm, mean_cn)?;
    let target = runoff_volume_m3(runoff_mm, valid_cells, store.cell_area_m2());
    let solution = solve_level(&dem, target, solver)?;

    debug!(
        watershed = id,
        valid_cells,
        mean_cn,
        runoff_mm,
        target_m3 = target,
        level_m = solution.level_m(),
        outcome = ?solution.outcome(),
        iterations = solution.iterations(),
        "watershed processed"
    );

    let tile = (solution.outcome() != Outcome::Degenerate && solution.level_m().is_finite())
        .then(|| with_depth_sentinel(&depth_grid(&dem, solution.level_m())));
    let record = WatershedRecord::from_solution(
        id.to_string(),
        valid_cells,
        mean_cn,
        runoff_mm,
        &solution,
    );
    Ok(WatershedOutput { tile, record })
}

/// Rewrites a depth tile onto [`DEPTH_NODATA`]. The clipped terrain it
/// was rasterised from carries the elevation raster's sentinel, which
/// may be NaN and would not survive a trip through a grid file.
fn with_depth_sentinel(depth: &Grid<f64>) -> Grid<f64> {
    let nodata = depth.nodata();
    let data = depth
        .data()
        .mapv(|v| if v.is_nodata(nodata) { DEPTH_NODATA } else { v });
    Grid::new(*depth.transform(), depth.crs().clone(), DEPTH_NODATA, data)
}

/// Turns `target` cells no-data wherever `reference` has no data. Both
/// grids must have the same shape.
fn mask_missing<T: CellValue, U: CellValue>(target: &mut Grid<T>, reference: &Grid<U>) {
    let (rows, cols) = target.shape();
    let nodata = target.nodata();
    for row in 0..rows {
        for col in 0..cols {
            if !reference.is_valid(row, col) {
                target.data_mut()[[row, col]] = nodata;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use poseidon_clip::Polygon;
    use poseidon_grid::{Crs, GridTransform};
    use poseidon_scs::CnTable;

    use super::*;
    use crate::catalog::GridCatalog;
    use crate::record::WatershedStatus;

    // 4 x 4 city, 10 m cells: a 1 m deep pit in the north-west quadrant,
    // flat 10 m ground elsewhere.
    fn catalog() -> GridCatalog {
        let transform = GridTransform::new(0.0, 0.0, 10.0).unwrap();
        let mut dem_data = Array2::from_elem((4, 4), 10.0);
        dem_data[[1, 1]] = 9.0;
        let dem = Grid::new(transform, Crs::local(), -9999.0, dem_data);
        let lu = Grid::new(transform, Crs::local(), -1, Array2::from_elem((4, 4), 5));
        GridCatalog::new(dem, lu).unwrap()
    }

    fn whole_city() -> WatershedFeature {
        let polygon = Polygon::new(vec![vec![
            (0.0, 0.0),
            (40.0, 0.0),
            (40.0, 40.0),
            (0.0, 40.0),
        ]])
        .unwrap();
        WatershedFeature::new("ws-1", polygon)
    }

    #[test]
    fn a_storm_fills_the_pit() {
        let catalog = catalog();
        // Land cover 5 maps to CN 100: all rain becomes runoff.
        let table = CnTable::new([(5, 100)]).unwrap();
        let output = process_watershed(
            &catalog,
            &table,
            &whole_city(),
            10.0,
            &SolverConfig::new(),
        );

        let record = &output.record;
        assert_eq!(record.status, WatershedStatus::Solved);
        assert_eq!(record.valid_cells, 16);
        assert_relative_eq!(record.mean_curve_number.unwrap(), 100.0);
        assert_relative_eq!(record.runoff_depth_mm.unwrap(), 10.0);
        // 10 mm over 1600 m^2 of catchment is 16 m^3, which stands
        // 0.16 m deep in the 100 m^2 pit.
        assert_relative_eq!(record.target_volume_m3.unwrap(), 16.0);
        assert_relative_eq!(record.level_m.unwrap(), 9.16, epsilon = 1e-3);

        let tile = output.tile.expect("solved watershed has a tile");
        assert_relative_eq!(tile.value(1, 1).unwrap(), 0.16, epsilon = 1e-3);
        assert_relative_eq!(tile.value(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn unmapped_land_cover_fails_the_watershed_only() {
        let catalog = catalog();
        let table = CnTable::new([(7, 30)]).unwrap();
        let output = process_watershed(
            &catalog,
            &table,
            &whole_city(),
            10.0,
            &SolverConfig::new(),
        );

        assert_eq!(output.record.status, WatershedStatus::Failed);
        assert!(output.tile.is_none());
        let error = output.record.error.as_deref().unwrap();
        assert!(error.contains("code 5"));
    }

    #[test]
    fn watershed_outside_the_city_is_degenerate() {
        let catalog = catalog();
        let table = CnTable::new([(5, 100)]).unwrap();
        let polygon = Polygon::new(vec![vec![
            (500.0, 500.0),
            (600.0, 500.0),
            (600.0, 600.0),
            (500.0, 600.0),
        ]])
        .unwrap();
        let output = process_watershed(
            &catalog,
            &table,
            &WatershedFeature::new("far-away", polygon),
            10.0,
            &SolverConfig::new(),
        );

        assert_eq!(output.record.status, WatershedStatus::Degenerate);
        assert_eq!(output.record.valid_cells, 0);
        assert!(output.record.level_m.is_none());
        assert!(output.tile.is_none());
    }

    #[test]
    fn land_cover_gaps_shrink_the_contributing_area() {
        let transform = GridTransform::new(0.0, 0.0, 10.0).unwrap();
        let dem = Grid::new(
            transform,
            Crs::local(),
            -9999.0,
            array![[1.0, 2.0], [3.0, 4.0]],
        );
        let lu = Grid::new(transform, Crs::local(), -1, array![[5, -1], [5, 5]]);
        let catalog = GridCatalog::new(dem, lu).unwrap();
        let table = CnTable::new([(5, 100)]).unwrap();
        let polygon = Polygon::new(vec![vec![
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 20.0),
            (0.0, 20.0),
        ]])
        .unwrap();

        let output = process_watershed(
            &catalog,
            &table,
            &WatershedFeature::new("gappy", polygon),
            100.0,
            &SolverConfig::new(),
        );

        // The cell without land cover joins neither the runoff area nor
        // the ponding surface.
        assert_eq!(output.record.valid_cells, 3);
        let tile = output.tile.expect("tile exists");
        assert_eq!(tile.value(0, 1), None);
        assert_eq!(tile.nodata(), DEPTH_NODATA);
        assert_eq!(tile.get(0, 1), Some(DEPTH_NODATA));
    }

    #[test]
    fn zero_storms_leave_a_dry_tile() {
        let catalog = catalog();
        let table = CnTable::new([(5, 100)]).unwrap();
        let output = process_watershed(
            &catalog,
            &table,
            &whole_city(),
            0.0,
            &SolverConfig::new(),
        );

        assert_eq!(output.record.status, WatershedStatus::Solved);
        assert_relative_eq!(output.record.target_volume_m3.unwrap(), 0.0);
        let tile = output.tile.expect("dry tile still exists");
        assert!(tile.valid_values().iter().all(|&d| d == 0.0));
    }
}

//! Alignment and tile-placement checks between grids.

use ndarray::Array2;
use poseidon_grid::{Crs, Grid, GridError, GridTransform};

fn frame(rows: usize, cols: usize) -> Grid<f64> {
    let transform = GridTransform::new(1000.0, 5000.0, 10.0).unwrap();
    Grid::all_nodata(transform, Crs::new("EPSG:32650"), -9999.0, rows, cols)
}

fn tile(xll: f64, yll: f64, cell: f64, rows: usize, cols: usize) -> Grid<f64> {
    let transform = GridTransform::new(xll, yll, cell).unwrap();
    Grid::new(
        transform,
        Crs::new("EPSG:32650"),
        -9999.0,
        Array2::from_elem((rows, cols), 1.0),
    )
}

#[test]
fn aligned_grids_pass() {
    let dem = frame(4, 6);
    let lu = {
        let transform = GridTransform::new(1000.0, 5000.0, 10.0).unwrap();
        Grid::new(
            transform,
            Crs::new("EPSG:32650"),
            -1_i32,
            Array2::from_elem((4, 6), 5),
        )
    };
    assert!(dem.ensure_aligned(&lu).is_ok());
}

#[test]
fn alignment_rejects_crs_mismatch() {
    let dem = frame(4, 6);
    let transform = GridTransform::new(1000.0, 5000.0, 10.0).unwrap();
    let other = Grid::<f64>::all_nodata(transform, Crs::new("EPSG:4326"), -9999.0, 4, 6);
    assert!(matches!(
        dem.ensure_aligned(&other),
        Err(GridError::CrsMismatch { .. })
    ));
}

#[test]
fn alignment_rejects_cell_size_mismatch() {
    let dem = frame(4, 6);
    let other = tile(1000.0, 5000.0, 5.0, 4, 6);
    assert!(matches!(
        dem.ensure_aligned(&other),
        Err(GridError::CellSizeMismatch { .. })
    ));
}

#[test]
fn alignment_rejects_shifted_origin() {
    let dem = frame(4, 6);
    let other = tile(1005.0, 5000.0, 10.0, 4, 6);
    assert!(matches!(
        dem.ensure_aligned(&other),
        Err(GridError::OriginMismatch { .. })
    ));
}

#[test]
fn alignment_rejects_shape_mismatch() {
    let dem = frame(4, 6);
    let other = tile(1000.0, 5000.0, 10.0, 4, 5);
    assert!(matches!(
        dem.ensure_aligned(&other),
        Err(GridError::ShapeMismatch { .. })
    ));
}

#[test]
fn window_offset_locates_an_interior_tile() {
    // Frame top edge sits at y = 5000 + 8 * 10 = 5080. A tile whose top
    // edge is 5060 starts two rows down.
    let dem = frame(8, 10);
    let t = tile(1030.0, 5020.0, 10.0, 4, 5);
    assert_eq!(dem.window_offset(&t).unwrap(), (2, 3));
}

#[test]
fn window_offset_accepts_a_full_cover_tile() {
    let dem = frame(8, 10);
    let t = tile(1000.0, 5000.0, 10.0, 8, 10);
    assert_eq!(dem.window_offset(&t).unwrap(), (0, 0));
}

#[test]
fn window_offset_rejects_off_lattice_tiles() {
    let dem = frame(8, 10);
    let t = tile(1033.0, 5020.0, 10.0, 4, 5);
    assert!(matches!(
        dem.window_offset(&t),
        Err(GridError::OffLattice { .. })
    ));
}

#[test]
fn window_offset_rejects_tiles_outside_the_frame() {
    let dem = frame(8, 10);
    // Starts one column west of the frame.
    let west = tile(990.0, 5020.0, 10.0, 4, 5);
    assert!(matches!(
        dem.window_offset(&west),
        Err(GridError::OutOfFrame { .. })
    ));
    // On the lattice, but hangs over the east edge.
    let east = tile(1070.0, 5020.0, 10.0, 4, 5);
    assert!(matches!(
        dem.window_offset(&east),
        Err(GridError::OutOfFrame { .. })
    ));
}

#[test]
fn window_offset_tolerates_float_noise_on_the_lattice() {
    let dem = frame(8, 10);
    let t = tile(1030.000001, 5019.999999, 10.0, 4, 5);
    assert_eq!(dem.window_offset(&t).unwrap(), (2, 3));
}

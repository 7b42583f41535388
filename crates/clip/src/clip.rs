//! Lattice-aligned clipping of rasters to footprints.

use ndarray::Array2;
use poseidon_grid::{CellValue, Grid, GridTransform};

use crate::error::ClipError;
use crate::polygon::Polygon;

/// Cuts the smallest lattice-aligned window covering `polygon` out of
/// `source` and masks every cell whose centre lies outside the
/// footprint.
///
/// The window is intersected with the source extent, so footprints
/// reaching past the raster edge are truncated and a footprint missing
/// the raster entirely yields a 0 x 0 grid. Masked and out-of-footprint
/// cells carry the source's no-data sentinel; cells inside the footprint
/// keep their source value, including no-data where the source itself
/// has gaps.
///
/// # Errors
///
/// Returns [`ClipError::Grid`] when the window transform cannot be
/// built, which only happens when the source transform is degenerate.
pub fn clip_to_polygon<T: CellValue>(
    source: &Grid<T>,
    polygon: &Polygon,
) -> Result<Grid<T>, ClipError> {
    let cell = source.transform().cell_size();
    let (rows, cols) = source.shape();
    let xll = source.transform().xll();
    let top = source.transform().top_edge(rows);

    let (min_x, min_y, max_x, max_y) = polygon.bbox();

    // Window in cell indices, clamped to the source. Rows count from the
    // top, so max_y fixes the first row and min_y the last.
    let col0 = ((min_x - xll) / cell).floor().clamp(0.0, cols as f64) as usize;
    let col1 = ((max_x - xll) / cell).ceil().clamp(0.0, cols as f64) as usize;
    let row0 = ((top - max_y) / cell).floor().clamp(0.0, rows as f64) as usize;
    let row1 = ((top - min_y) / cell).ceil().clamp(0.0, rows as f64) as usize;

    let out_rows = row1 - row0;
    let out_cols = col1 - col0;

    let transform = GridTransform::new(
        xll + col0 as f64 * cell,
        source.transform().yll() + (rows - row1) as f64 * cell,
        cell,
    )?;

    let nodata = source.nodata();
    let mut data = Array2::from_elem((out_rows, out_cols), nodata);
    for r in 0..out_rows {
        for c in 0..out_cols {
            let (x, y) = source.cell_center(row0 + r, col0 + c);
            if polygon.contains(x, y) {
                if let Some(v) = source.get(row0 + r, col0 + c) {
                    data[[r, c]] = v;
                }
            }
        }
    }

    Ok(Grid::new(transform, source.crs().clone(), nodata, data))
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use poseidon_grid::Crs;

    use super::*;

    #[test]
    fn keeps_values_inside_the_footprint() {
        let transform = GridTransform::new(0.0, 0.0, 10.0).unwrap();
        let data = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let source = Grid::new(transform, Crs::local(), -9999.0, data);

        // Covers the four centre cells only.
        let polygon = Polygon::new(vec![vec![
            (10.0, 10.0),
            (30.0, 10.0),
            (30.0, 30.0),
            (10.0, 30.0),
        ]])
        .unwrap();

        let clipped = clip_to_polygon(&source, &polygon).unwrap();
        assert_eq!(clipped.shape(), (2, 2));
        assert_eq!(clipped.value(0, 0), Some(5.0));
        assert_eq!(clipped.value(1, 1), Some(10.0));
        assert_eq!(clipped.valid_count(), 4);
    }

    #[test]
    fn footprint_outside_the_raster_yields_an_empty_window() {
        let transform = GridTransform::new(0.0, 0.0, 10.0).unwrap();
        let source = Grid::<f64>::all_nodata(transform, Crs::local(), -9999.0, 4, 4);
        let polygon = Polygon::new(vec![vec![
            (100.0, 100.0),
            (120.0, 100.0),
            (120.0, 120.0),
            (100.0, 120.0),
        ]])
        .unwrap();

        let clipped = clip_to_polygon(&source, &polygon).unwrap();
        assert_eq!(clipped.shape(), (0, 0));
        assert_eq!(clipped.valid_count(), 0);
    }
}

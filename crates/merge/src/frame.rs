//! Frame construction over a set of tiles.

use poseidon_grid::{Grid, GridTransform};

use crate::error::MergeError;

/// Builds an all-no-data frame spanning the union of the tiles'
/// extents, on the CRS and cell size of the first tile.
///
/// Every tile must share that CRS and cell size; lattice placement is
/// not checked here, since [`MergeBuffer::composite`] rejects an
/// off-lattice tile the moment it is placed.
///
/// [`MergeBuffer::composite`]: crate::MergeBuffer::composite
///
/// # Errors
///
/// Returns [`MergeError::NoTiles`] for an empty tile set, or the
/// underlying [`GridError`](poseidon_grid::GridError) when a tile
/// disagrees on CRS or cell size.
pub fn union_frame<'a, I>(tiles: I, nodata: f64) -> Result<Grid<f64>, MergeError>
where
    I: IntoIterator<Item = &'a Grid<f64>>,
{
    let mut iter = tiles.into_iter();
    let Some(first) = iter.next() else {
        return Err(MergeError::NoTiles);
    };
    let cell = first.transform().cell_size();
    let crs = first.crs().clone();

    let (mut min_x, mut min_y, mut max_x, mut max_y) = first.extent();
    for tile in iter {
        first.ensure_compatible(tile)?;
        let (x0, y0, x1, y1) = tile.extent();
        min_x = min_x.min(x0);
        min_y = min_y.min(y0);
        max_x = max_x.max(x1);
        max_y = max_y.max(y1);
    }

    let cols = ((max_x - min_x) / cell).round() as usize;
    let rows = ((max_y - min_y) / cell).round() as usize;
    let transform = GridTransform::new(min_x, min_y, cell)?;
    Ok(Grid::all_nodata(transform, crs, nodata, rows, cols))
}

//! Georeference of a raster grid.

use crate::error::GridError;

/// Placement of a raster on the ground: the map coordinates of its
/// lower-left corner and the side length of its square cells.
///
/// Map coordinates grow eastwards in `x` and northwards in `y`, while
/// array rows grow southwards, so the cell at `(row, col)` has its centre
/// at
///
/// ```text
/// x = xll + (col + 0.5) * cell_size
/// y = yll + (rows - row - 0.5) * cell_size
/// ```
///
/// for a grid of `rows` rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    xll: f64,
    yll: f64,
    cell_size: f64,
}

impl GridTransform {
    /// Creates a transform from the lower-left corner and cell size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCellSize`] unless `cell_size` is a
    /// finite positive number, and [`GridError::NonFiniteOrigin`] when
    /// either corner coordinate is NaN or infinite.
    pub fn new(xll: f64, yll: f64, cell_size: f64) -> Result<Self, GridError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize { value: cell_size });
        }
        if !xll.is_finite() || !yll.is_finite() {
            return Err(GridError::NonFiniteOrigin { x: xll, y: yll });
        }
        Ok(Self { xll, yll, cell_size })
    }

    /// Easting of the lower-left corner.
    pub fn xll(&self) -> f64 {
        self.xll
    }

    /// Northing of the lower-left corner.
    pub fn yll(&self) -> f64 {
        self.yll
    }

    /// Side length of a cell in map units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Ground area covered by one cell, in squared map units.
    pub fn cell_area(&self) -> f64 {
        self.cell_size * self.cell_size
    }

    /// Northing of the top edge of a grid with `rows` rows.
    pub fn top_edge(&self, rows: usize) -> f64 {
        self.yll + rows as f64 * self.cell_size
    }

    /// Map coordinates of the centre of cell `(row, col)` in a grid with
    /// `rows` rows.
    pub fn cell_center(&self, row: usize, col: usize, rows: usize) -> (f64, f64) {
        let x = self.xll + (col as f64 + 0.5) * self.cell_size;
        let y = self.yll + (rows as f64 - row as f64 - 0.5) * self.cell_size;
        (x, y)
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of a grid with the
    /// given shape.
    pub fn extent(&self, rows: usize, cols: usize) -> (f64, f64, f64, f64) {
        (
            self.xll,
            self.yll,
            self.xll + cols as f64 * self.cell_size,
            self.top_edge(rows),
        )
    }
}

//! The grid type and its cell-value abstraction.

use ndarray::Array2;

use crate::crs::Crs;
use crate::error::GridError;
use crate::transform::GridTransform;

/// Relative tolerance when comparing cell sizes between grids.
const CELL_SIZE_REL_TOL: f64 = 1e-9;

/// Largest acceptable deviation from the cell lattice, as a fraction of
/// one cell.
const LATTICE_TOL: f64 = 1e-6;

/// A value that can live in a grid cell.
///
/// The only behaviour a cell type must define is how it compares against
/// the grid's no-data sentinel.
pub trait CellValue: Copy + PartialEq + std::fmt::Debug {
    /// Returns `true` when `self` marks a cell without data.
    fn is_nodata(self, nodata: Self) -> bool {
        self == nodata
    }
}

impl CellValue for f64 {
    /// NaN cells are always no-data, whatever sentinel the grid carries.
    fn is_nodata(self, nodata: Self) -> bool {
        self.is_nan() || self == nodata
    }
}

impl CellValue for i32 {}

impl CellValue for u8 {}

/// A georeferenced raster: cell values plus the transform, CRS and
/// no-data sentinel needed to interpret them.
///
/// Row 0 is the northernmost band of the raster and rows grow southwards,
/// matching the row order of on-disk ASCII grids.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: CellValue> {
    transform: GridTransform,
    crs: Crs,
    nodata: T,
    data: Array2<T>,
}

impl<T: CellValue> Grid<T> {
    /// Wraps an array of cell values with its georeference.
    pub fn new(transform: GridTransform, crs: Crs, nodata: T, data: Array2<T>) -> Self {
        Self {
            transform,
            crs,
            nodata,
            data,
        }
    }

    /// Creates a grid of the given shape with every cell set to the
    /// no-data sentinel.
    pub fn all_nodata(
        transform: GridTransform,
        crs: Crs,
        nodata: T,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self::new(transform, crs, nodata, Array2::from_elem((rows, cols), nodata))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// The grid's georeference.
    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    /// The grid's coordinate reference system.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The no-data sentinel.
    pub fn nodata(&self) -> T {
        self.nodata
    }

    /// The underlying cell array.
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Mutable access to the underlying cell array.
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Raw cell value, or `None` when out of bounds. No-data cells are
    /// returned as stored.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.data.get((row, col)).copied()
    }

    /// Cell value, or `None` when out of bounds or no-data.
    pub fn value(&self, row: usize, col: usize) -> Option<T> {
        self.get(row, col).filter(|v| !v.is_nodata(self.nodata))
    }

    /// Whether the cell holds data.
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.value(row, col).is_some()
    }

    /// Number of cells holding data.
    pub fn valid_count(&self) -> usize {
        self.data
            .iter()
            .filter(|v| !v.is_nodata(self.nodata))
            .count()
    }

    /// All data-holding cell values in row-major order.
    pub fn valid_values(&self) -> Vec<T> {
        self.data
            .iter()
            .filter(|v| !v.is_nodata(self.nodata))
            .copied()
            .collect()
    }

    /// Map coordinates of the centre of cell `(row, col)`.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        self.transform.cell_center(row, col, self.rows())
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of the grid.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        self.transform.extent(self.rows(), self.cols())
    }

    /// Checks that `other` covers exactly the same cells as `self`: same
    /// CRS, cell size, origin and shape.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found, in the order CRS, cell size,
    /// origin, shape.
    pub fn ensure_aligned<U: CellValue>(&self, other: &Grid<U>) -> Result<(), GridError> {
        self.ensure_compatible(other)?;
        let cell = self.transform.cell_size();
        let dx_cells = (other.transform.xll() - self.transform.xll()) / cell;
        let dy_cells = (other.transform.yll() - self.transform.yll()) / cell;
        if dx_cells.abs() > LATTICE_TOL || dy_cells.abs() > LATTICE_TOL {
            return Err(GridError::OriginMismatch { dx_cells, dy_cells });
        }
        if self.shape() != other.shape() {
            return Err(GridError::ShapeMismatch {
                expected_rows: self.rows(),
                expected_cols: self.cols(),
                rows: other.rows(),
                cols: other.cols(),
            });
        }
        Ok(())
    }

    /// Locates `tile` within `self` and returns the `(row, col)` of the
    /// frame cell under the tile's top-left cell.
    ///
    /// The tile must share the frame's CRS and cell size, sit on the
    /// frame's cell lattice, and lie entirely inside the frame.
    pub fn window_offset<U: CellValue>(&self, tile: &Grid<U>) -> Result<(usize, usize), GridError> {
        self.ensure_compatible(tile)?;
        let cell = self.transform.cell_size();
        let col_f = (tile.transform.xll() - self.transform.xll()) / cell;
        let row_f = (self.transform.top_edge(self.rows()) - tile.transform.top_edge(tile.rows())) / cell;
        let col0 = col_f.round();
        let row0 = row_f.round();
        if (col_f - col0).abs() > LATTICE_TOL || (row_f - row0).abs() > LATTICE_TOL {
            return Err(GridError::OffLattice {
                dx_cells: col_f - col0,
                dy_cells: row_f - row0,
            });
        }
        let (row0, col0) = (row0 as i64, col0 as i64);
        let fits = row0 >= 0
            && col0 >= 0
            && row0 as usize + tile.rows() <= self.rows()
            && col0 as usize + tile.cols() <= self.cols();
        if !fits {
            return Err(GridError::OutOfFrame {
                row_offset: row0,
                col_offset: col0,
                frame_rows: self.rows(),
                frame_cols: self.cols(),
            });
        }
        Ok((row0 as usize, col0 as usize))
    }

    /// Checks that `other` lives in the same reference system and cell
    /// size as `self`, without constraining its placement. This is the
    /// shared precondition of [`ensure_aligned`](Self::ensure_aligned)
    /// and [`window_offset`](Self::window_offset).
    pub fn ensure_compatible<U: CellValue>(&self, other: &Grid<U>) -> Result<(), GridError> {
        if self.crs != other.crs {
            return Err(GridError::CrsMismatch {
                left: self.crs.to_string(),
                right: other.crs.to_string(),
            });
        }
        let (a, b) = (self.transform.cell_size(), other.transform.cell_size());
        if (a - b).abs() > CELL_SIZE_REL_TOL * a.max(b) {
            return Err(GridError::CellSizeMismatch { left: a, right: b });
        }
        Ok(())
    }
}

impl<T: CellValue + PartialOrd> Grid<T> {
    /// Minimum and maximum over the data-holding cells, or `None` when
    /// the grid has no valid cell.
    pub fn valid_range(&self) -> Option<(T, T)> {
        let mut range: Option<(T, T)> = None;
        for &v in self.data.iter() {
            if v.is_nodata(self.nodata) {
                continue;
            }
            range = Some(match range {
                None => (v, v),
                Some((lo, hi)) => (
                    if v < lo { v } else { lo },
                    if v > hi { v } else { hi },
                ),
            });
        }
        range
    }
}

//! Error types for the poseidon-grid crate.

use thiserror::Error;

/// Errors raised while constructing grids or checking their alignment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Returned when a transform is built with a cell size that is not a
    /// finite positive number.
    #[error("cell size must be a finite positive number, got {value}")]
    InvalidCellSize {
        /// The offending cell size in map units.
        value: f64,
    },

    /// Returned when a transform is built with a non-finite origin.
    #[error("grid origin must be finite, got ({x}, {y})")]
    NonFiniteOrigin {
        /// Easting of the lower-left corner.
        x: f64,
        /// Northing of the lower-left corner.
        y: f64,
    },

    /// Returned when two grids that must cover the same cells have
    /// different shapes.
    #[error("grid shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        /// Rows of the reference grid.
        expected_rows: usize,
        /// Columns of the reference grid.
        expected_cols: usize,
        /// Rows of the other grid.
        rows: usize,
        /// Columns of the other grid.
        cols: usize,
    },

    /// Returned when two grids carry different coordinate reference
    /// systems.
    #[error("coordinate reference system mismatch: {left} vs {right}")]
    CrsMismatch {
        /// CRS of the reference grid.
        left: String,
        /// CRS of the other grid.
        right: String,
    },

    /// Returned when two grids have different cell sizes.
    #[error("cell size mismatch: {left} vs {right}")]
    CellSizeMismatch {
        /// Cell size of the reference grid in map units.
        left: f64,
        /// Cell size of the other grid in map units.
        right: f64,
    },

    /// Returned when two grids that must share an origin are offset from
    /// one another.
    #[error("grid origins differ by ({dx_cells}, {dy_cells}) cells")]
    OriginMismatch {
        /// Easting offset in cell units.
        dx_cells: f64,
        /// Northing offset in cell units.
        dy_cells: f64,
    },

    /// Returned when a tile does not sit on the cell lattice of the frame
    /// it is being placed into.
    #[error("tile is off the frame lattice by ({dx_cells}, {dy_cells}) cells")]
    OffLattice {
        /// Fractional easting offset in cell units.
        dx_cells: f64,
        /// Fractional northing offset in cell units.
        dy_cells: f64,
    },

    /// Returned when a tile extends outside the frame it is being placed
    /// into.
    #[error("tile at row {row_offset}, col {col_offset} extends outside a {frame_rows}x{frame_cols} frame")]
    OutOfFrame {
        /// Row of the tile's top-left cell within the frame.
        row_offset: i64,
        /// Column of the tile's top-left cell within the frame.
        col_offset: i64,
        /// Rows of the frame.
        frame_rows: usize,
        /// Columns of the frame.
        frame_cols: usize,
    },
}

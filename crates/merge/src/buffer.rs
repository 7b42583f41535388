//! Tile-by-tile compositing into a frame.

use poseidon_grid::{Grid, GridError};
use serde::{Deserialize, Serialize};

/// What to do when a tile writes a cell the frame already holds data
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Keep the larger depth. Overlaps sit on watershed boundaries where
    /// either neighbour may flood the cell; the hazard map should show
    /// the worse case.
    #[default]
    Max,
    /// Let the later tile overwrite the earlier one, like a plain
    /// raster mosaic.
    LastWins,
}

/// Counters from placing one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeReport {
    /// Valid tile cells placed into the frame.
    pub written: usize,
    /// Subset of those that landed on a cell another tile had already
    /// written.
    pub overlapped: usize,
}

/// An accumulating city-wide raster.
///
/// Create it over an all-no-data frame, feed each watershed tile through
/// [`composite`](Self::composite), then take the finished raster with
/// [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct MergeBuffer {
    frame: Grid<f64>,
    policy: OverlapPolicy,
    tiles: usize,
    overlapped_cells: u64,
}

impl MergeBuffer {
    /// Wraps a frame raster, usually all no-data, ready for
    /// compositing.
    pub fn new(frame: Grid<f64>, policy: OverlapPolicy) -> Self {
        Self {
            frame,
            policy,
            tiles: 0,
            overlapped_cells: 0,
        }
    }

    /// The configured overlap policy.
    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Tiles composited so far.
    pub fn tiles(&self) -> usize {
        self.tiles
    }

    /// Total cells across all tiles that overlapped earlier writes.
    pub fn overlapped_cells(&self) -> u64 {
        self.overlapped_cells
    }

    /// Writes a tile's valid cells into the frame.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] when the tile is not on the frame's CRS,
    /// cell size and lattice, or does not lie entirely inside the frame.
    /// The frame is untouched on error.
    pub fn composite(&mut self, tile: &Grid<f64>) -> Result<CompositeReport, GridError> {
        let (row0, col0) = self.frame.window_offset(tile)?;

        let mut written = 0;
        let mut overlapped = 0;
        for row in 0..tile.rows() {
            for col in 0..tile.cols() {
                let Some(depth) = tile.value(row, col) else {
                    continue;
                };
                let target = (row0 + row, col0 + col);
                let existing = self.frame.value(target.0, target.1);
                let next = match (existing, self.policy) {
                    (None, _) => depth,
                    (Some(current), OverlapPolicy::Max) => current.max(depth),
                    (Some(_), OverlapPolicy::LastWins) => depth,
                };
                if existing.is_some() {
                    overlapped += 1;
                }
                written += 1;
                self.frame.data_mut()[[target.0, target.1]] = next;
            }
        }

        self.tiles += 1;
        self.overlapped_cells += overlapped as u64;
        Ok(CompositeReport { written, overlapped })
    }

    /// Consumes the buffer and returns the merged raster.
    pub fn finish(self) -> Grid<f64> {
        self.frame
    }

    /// The frame as composited so far.
    pub fn frame(&self) -> &Grid<f64> {
        &self.frame
    }
}

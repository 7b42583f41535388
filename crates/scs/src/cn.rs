//! Land cover to curve number translation.

use std::collections::BTreeMap;

use ndarray::Array2;
use poseidon_grid::Grid;

use crate::error::ScsError;

/// No-data sentinel for curve-number rasters. Curve numbers live in
/// 0..=100, so the top of the `u8` range is free.
pub const CN_NODATA: u8 = u8::MAX;

/// Translates land-cover codes into curve numbers.
///
/// Built either from an explicit code-to-CN table, or as the
/// [identity](CnTable::identity) for inputs that already are curve-number
/// rasters. Lookups for codes the table does not know return `None`;
/// there is no default curve number.
#[derive(Debug, Clone, PartialEq)]
pub struct CnTable {
    lookup: Lookup,
}

#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    Table(BTreeMap<i32, u8>),
    Identity,
}

impl CnTable {
    /// Builds a table from `(land_cover_code, curve_number)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ScsError::EmptyTable`] for an empty entry list,
    /// [`ScsError::DuplicateLandCover`] when a code appears twice, and
    /// [`ScsError::TableEntryOutOfRange`] for a curve number above 100.
    pub fn new(entries: impl IntoIterator<Item = (i32, u8)>) -> Result<Self, ScsError> {
        let mut table = BTreeMap::new();
        for (code, curve_number) in entries {
            if curve_number > 100 {
                return Err(ScsError::TableEntryOutOfRange { code, curve_number });
            }
            if table.insert(code, curve_number).is_some() {
                return Err(ScsError::DuplicateLandCover { code });
            }
        }
        if table.is_empty() {
            return Err(ScsError::EmptyTable);
        }
        Ok(Self {
            lookup: Lookup::Table(table),
        })
    }

    /// A table that maps every code in 0..=100 to itself, for land-cover
    /// inputs that already hold curve numbers.
    pub fn identity() -> Self {
        Self {
            lookup: Lookup::Identity,
        }
    }

    /// Curve number for a land-cover code, or `None` when unmapped.
    pub fn curve_number(&self, code: i32) -> Option<u8> {
        match &self.lookup {
            Lookup::Table(table) => table.get(&code).copied(),
            Lookup::Identity => (0..=100).contains(&code).then_some(code as u8),
        }
    }

    /// Translates a land-cover raster into a curve-number raster with
    /// the same georeference. No-data cells stay no-data.
    ///
    /// # Errors
    ///
    /// Returns [`ScsError::UnmappedLandCover`] on the first valid cell
    /// whose code the table does not know.
    pub fn map_curve_numbers(&self, land_cover: &Grid<i32>) -> Result<Grid<u8>, ScsError> {
        let (rows, cols) = land_cover.shape();
        let mut data = Array2::from_elem((rows, cols), CN_NODATA);
        for row in 0..rows {
            for col in 0..cols {
                if let Some(code) = land_cover.value(row, col) {
                    let cn = self
                        .curve_number(code)
                        .ok_or(ScsError::UnmappedLandCover { code })?;
                    data[[row, col]] = cn;
                }
            }
        }
        Ok(Grid::new(
            *land_cover.transform(),
            land_cover.crs().clone(),
            CN_NODATA,
            data,
        ))
    }
}

/// Mean curve number over the valid cells of a CN raster, or `None`
/// when the raster has no valid cell.
pub fn mean_curve_number(curve_numbers: &Grid<u8>) -> Option<f64> {
    let values = curve_numbers.valid_values();
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&cn| f64::from(cn)).sum();
    Some(sum / values.len() as f64)
}

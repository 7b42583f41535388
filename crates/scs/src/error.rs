//! Error types for the poseidon-scs crate.

use thiserror::Error;

/// Errors raised while building curve-number tables or evaluating the
/// runoff transform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScsError {
    /// Returned when a curve-number table is built without entries.
    #[error("curve number table has no entries")]
    EmptyTable,

    /// Returned when a land-cover code appears twice in a table.
    #[error("land cover code {code} listed twice in the curve number table")]
    DuplicateLandCover {
        /// The repeated code.
        code: i32,
    },

    /// Returned when a table entry carries a curve number above 100.
    #[error("curve number {curve_number} for land cover code {code} is outside 0..=100")]
    TableEntryOutOfRange {
        /// Land-cover code of the entry.
        code: i32,
        /// The offending curve number.
        curve_number: u8,
    },

    /// Returned when a land-cover raster contains a code the table does
    /// not map. There is deliberately no fallback curve number; an
    /// unmapped class must be fixed in the table, not papered over.
    #[error("land cover code {code} has no curve number mapping")]
    UnmappedLandCover {
        /// The unmapped code.
        code: i32,
    },

    /// Returned when a mean curve number leaves the valid range.
    #[error("curve number {value} is outside 0..=100")]
    CurveNumberOutOfRange {
        /// The offending value.
        value: f64,
    },

    /// Returned when a storm depth is negative or not finite.
    #[error("storm depth {value} mm is not a non-negative finite number")]
    InvalidStormDepth {
        /// The offending depth in mm.
        value: f64,
    },
}

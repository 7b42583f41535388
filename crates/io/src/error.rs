//! Error types for the poseidon-io crate.

use std::path::PathBuf;

use poseidon_grid::GridError;
use thiserror::Error;

/// Errors raised while reading or writing pipeline files.
#[derive(Error, Debug)]
pub enum IoError {
    /// Returned when a file cannot be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// The file in question.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a file cannot be created or written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// The file in question.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when an ASCII grid file does not parse.
    #[error("{}:{line}: {message}", .path.display())]
    AsciiGrid {
        /// The file in question.
        path: PathBuf,
        /// One-based line where parsing stopped.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Returned when a GeoJSON watershed file does not parse or lacks a
    /// required member.
    #[error("{}: {message}", .path.display())]
    GeoJson {
        /// The file in question.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A georeference problem in data read from a file.
    #[error(transparent)]
    Grid(#[from] GridError),
}

//! ESRI ASCII grid reading and writing.
//!
//! The format is a short `key value` header followed by whitespace
//! separated cell values, first row northernmost:
//!
//! ```text
//! ncols 4
//! nrows 3
//! xllcorner 500000
//! yllcorner 2400000
//! cellsize 10
//! NODATA_value -9999
//! 12.5 11.0 -9999 10.2
//! ...
//! ```
//!
//! Header keys are matched case-insensitively and the `xllcenter` /
//! `yllcenter` variants are converted to the corner convention on read.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use poseidon_grid::{CellValue, Crs, Grid, GridTransform};

use crate::error::IoError;

/// A cell type with an ASCII grid representation.
pub trait AsciiValue: CellValue {
    /// Sentinel assumed when the header carries no `nodata_value`.
    const DEFAULT_NODATA: Self;

    /// Parses one whitespace-separated token.
    fn parse_token(token: &str) -> Option<Self>;

    /// Formats a value for writing. The output must parse back to the
    /// same value.
    fn format_value(&self) -> String;
}

impl AsciiValue for f64 {
    const DEFAULT_NODATA: Self = -9999.0;

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn format_value(&self) -> String {
        format!("{self}")
    }
}

impl AsciiValue for i32 {
    const DEFAULT_NODATA: Self = -9999;

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn format_value(&self) -> String {
        format!("{self}")
    }
}

/// Reads an ESRI ASCII grid and tags it with the given CRS.
///
/// # Errors
///
/// Returns [`IoError::Read`] when the file cannot be read and
/// [`IoError::AsciiGrid`] with the offending line when it does not
/// parse: unknown or repeated-value header keys, non-numeric tokens, or
/// a cell count that disagrees with `nrows * ncols`.
pub fn read_ascii_grid<T: AsciiValue>(path: &Path, crs: Crs) -> Result<Grid<T>, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ascii_grid(&text, path, crs)
}

fn parse_ascii_grid<T: AsciiValue>(text: &str, path: &Path, crs: Crs) -> Result<Grid<T>, IoError> {
    let fail = |line: usize, message: String| IoError::AsciiGrid {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut x_origin: Option<(f64, bool)> = None;
    let mut y_origin: Option<(f64, bool)> = None;
    let mut cellsize: Option<f64> = None;
    let mut nodata: Option<T> = None;

    let mut values: Vec<T> = Vec::new();
    let mut in_data = false;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        last_line = line;
        let mut tokens = raw.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        let is_header = !in_data
            && first
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic());
        if is_header {
            let key = first.to_ascii_lowercase();
            let value = tokens
                .next()
                .ok_or_else(|| fail(line, format!("header entry {key} has no value")))?;
            if tokens.next().is_some() {
                return Err(fail(line, format!("header entry {key} has trailing tokens")));
            }
            let parse_f64 = |v: &str| {
                v.parse::<f64>()
                    .map_err(|_| fail(line, format!("header entry {key} is not a number: {v:?}")))
            };
            match key.as_str() {
                "ncols" | "nrows" => {
                    let n = value
                        .parse::<usize>()
                        .map_err(|_| fail(line, format!("header entry {key} is not a cell count: {value:?}")))?;
                    if key == "ncols" {
                        ncols = Some(n);
                    } else {
                        nrows = Some(n);
                    }
                }
                "xllcorner" => x_origin = Some((parse_f64(value)?, false)),
                "xllcenter" => x_origin = Some((parse_f64(value)?, true)),
                "yllcorner" => y_origin = Some((parse_f64(value)?, false)),
                "yllcenter" => y_origin = Some((parse_f64(value)?, true)),
                "cellsize" => cellsize = Some(parse_f64(value)?),
                "nodata_value" => {
                    let parsed = T::parse_token(value)
                        .ok_or_else(|| fail(line, format!("bad nodata value {value:?}")))?;
                    nodata = Some(parsed);
                }
                other => return Err(fail(line, format!("unknown header entry {other}"))),
            }
        } else {
            in_data = true;
            for token in std::iter::once(first).chain(tokens) {
                let parsed = T::parse_token(token)
                    .ok_or_else(|| fail(line, format!("bad cell value {token:?}")))?;
                values.push(parsed);
            }
        }
    }

    let missing = |key: &str| fail(last_line, format!("missing header entry {key}"));
    let ncols = ncols.ok_or_else(|| missing("ncols"))?;
    let nrows = nrows.ok_or_else(|| missing("nrows"))?;
    let (x, x_center) = x_origin.ok_or_else(|| missing("xllcorner"))?;
    let (y, y_center) = y_origin.ok_or_else(|| missing("yllcorner"))?;
    let cellsize = cellsize.ok_or_else(|| missing("cellsize"))?;

    if values.len() != nrows * ncols {
        return Err(fail(
            last_line,
            format!(
                "expected {} cell values for {nrows}x{ncols}, found {}",
                nrows * ncols,
                values.len()
            ),
        ));
    }

    // Centre-origin headers give the middle of the lower-left cell.
    let xll = if x_center { x - cellsize / 2.0 } else { x };
    let yll = if y_center { y - cellsize / 2.0 } else { y };
    let transform = GridTransform::new(xll, yll, cellsize)?;
    let data = Array2::from_shape_vec((nrows, ncols), values)
        .map_err(|e| fail(last_line, format!("cell values do not fill the grid: {e}")))?;
    Ok(Grid::new(
        transform,
        crs,
        nodata.unwrap_or(T::DEFAULT_NODATA),
        data,
    ))
}

/// Writes a grid as an ESRI ASCII file.
///
/// The header always uses the corner convention and states the grid's
/// no-data sentinel; `f64` NaN cells are written as that sentinel so the
/// file round-trips without NaN tokens.
///
/// # Errors
///
/// Returns [`IoError::Write`] when the file cannot be created or
/// written.
pub fn write_ascii_grid<T: AsciiValue>(path: &Path, grid: &Grid<T>) -> Result<(), IoError> {
    let transform = grid.transform();
    let nodata = grid.nodata();

    let mut out = String::new();
    out.push_str(&format!("ncols {}\n", grid.cols()));
    out.push_str(&format!("nrows {}\n", grid.rows()));
    out.push_str(&format!("xllcorner {}\n", transform.xll().format_value()));
    out.push_str(&format!("yllcorner {}\n", transform.yll().format_value()));
    out.push_str(&format!("cellsize {}\n", transform.cell_size().format_value()));
    out.push_str(&format!("NODATA_value {}\n", nodata.format_value()));

    for row in 0..grid.rows() {
        let line = (0..grid.cols())
            .map(|col| {
                let v = grid.data()[[row, col]];
                let v = if v.is_nodata(nodata) { nodata } else { v };
                v.format_value()
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }

    fs::write(path, out).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

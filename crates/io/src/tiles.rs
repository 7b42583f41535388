//! Naming and discovery of per-watershed depth tiles.

use std::path::{Path, PathBuf};

use crate::error::IoError;

/// File name for one watershed's depth tile within a scenario, e.g.
/// `flood_8121032140_2021_100yr.asc`.
pub fn tile_file_name(watershed_id: &str, scenario: &str) -> String {
    format!("flood_{watershed_id}_{scenario}.asc")
}

/// All `.asc` files directly inside `dir`, sorted by path so that merge
/// order is deterministic across runs and platforms.
///
/// # Errors
///
/// Returns [`IoError::Read`] when the directory cannot be listed.
pub fn find_tiles(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let entries = std::fs::read_dir(dir).map_err(|source| IoError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tiles = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IoError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_asc = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("asc"));
        if is_asc && path.is_file() {
            tiles.push(path);
        }
    }
    tiles.sort();
    Ok(tiles)
}

//! Merge command: reassemble previously written depth tiles.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use poseidon_grid::{Crs, Grid};
use poseidon_io::{find_tiles, read_ascii_grid, write_ascii_grid};
use poseidon_merge::{MergeBuffer, union_frame};
use poseidon_pipeline::DEPTH_NODATA;

use crate::cli::MergeArgs;
use crate::convert;

/// Run the standalone tile merge.
pub fn run(args: MergeArgs) -> Result<()> {
    let _cmd = info_span!("merge").entered();

    let policy = convert::parse_overlap(&args.overlap)?;
    let crs = Crs::new(args.crs.as_str());

    // 1. Discover tiles
    let paths = find_tiles(&args.tiles)
        .with_context(|| format!("failed to scan tile directory: {}", args.tiles.display()))?;
    if paths.is_empty() {
        bail!("no .asc tiles found in {}", args.tiles.display());
    }
    info!(n_tiles = paths.len(), dir = %args.tiles.display(), "tiles discovered");

    // 2. Read them all
    let mut tiles: Vec<Grid<f64>> = Vec::with_capacity(paths.len());
    for path in &paths {
        let tile = read_ascii_grid::<f64>(path, crs.clone())
            .with_context(|| format!("failed to read tile: {}", path.display()))?;
        tiles.push(tile);
    }

    // 3. Composite onto the union frame
    let frame = union_frame(&tiles, DEPTH_NODATA).context("tiles do not share a grid")?;
    let mut buffer = MergeBuffer::new(frame, policy);
    for (tile, path) in tiles.iter().zip(&paths) {
        buffer
            .composite(tile)
            .with_context(|| format!("tile does not fit the union frame: {}", path.display()))?;
    }

    let overlapped = buffer.overlapped_cells();
    let merged = buffer.finish();

    // 4. Write the merged raster
    write_ascii_grid(&args.output, &merged)
        .with_context(|| format!("failed to write merged raster: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        rows = merged.rows(),
        cols = merged.cols(),
        valid_cells = merged.valid_count(),
        overlapped_cells = overlapped,
        "merged raster written"
    );

    Ok(())
}

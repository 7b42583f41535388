use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Poseidon urban flood-inundation mapper.
#[derive(Parser)]
#[command(
    name = "poseidon",
    version,
    about = "Design-storm flood inundation depth over micro-watersheds"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full simulation pipeline.
    Simulate(SimulateArgs),
    /// Merge previously written watershed depth tiles into one raster.
    Merge(MergeArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "poseidon.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run only the named scenario instead of every configured one.
    #[arg(short, long)]
    pub scenario: Option<String>,
}

/// Arguments for the `merge` subcommand.
#[derive(clap::Args)]
pub struct MergeArgs {
    /// Directory holding depth tiles (.asc).
    #[arg(short, long)]
    pub tiles: PathBuf,

    /// Path for the merged output raster.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Coordinate reference system label the tiles share.
    #[arg(long, default_value = "LOCAL")]
    pub crs: String,

    /// Overlap policy for contested cells ("max" or "last_wins").
    #[arg(long, default_value = "max")]
    pub overlap: String,
}

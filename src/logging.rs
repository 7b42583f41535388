use tracing_subscriber::EnvFilter;

/// Workspace crates whose spans and events the default filter admits.
const WORKSPACE_TARGETS: &[&str] = &[
    "poseidon",
    "poseidon_clip",
    "poseidon_grid",
    "poseidon_io",
    "poseidon_merge",
    "poseidon_pipeline",
    "poseidon_scs",
    "poseidon_solver",
];

/// Installs the tracing subscriber.
///
/// The repeated `-v` flag raises the level for every workspace crate:
/// warn by default, then info, debug, and trace. A `RUST_LOG`
/// environment variable takes precedence over the flag when present.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let per_crate = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(per_crate));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

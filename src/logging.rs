/// Tracing subscriber setup.
///
/// All output goes to stderr: stdout carries the JSON-RPC stream.
/// `RUST_LOG` takes precedence over the `--log-level` command line value.
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_filter`.
fn build_filter(default_filter: &str) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(val) if !val.trim().is_empty() => EnvFilter::builder().parse_lossy(val),
        _ => EnvFilter::builder().parse_lossy(default_filter),
    }
}

/// Install the global subscriber.  Calling this twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

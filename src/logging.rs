use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HOSTBOOK_LOG";

/// Install the global subscriber. Logs go to stderr so tables and JSON on
/// stdout stay clean. `HOSTBOOK_LOG` overrides the level entirely.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "hostbook=debug" } else { "hostbook=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

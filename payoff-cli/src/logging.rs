use tracing_subscriber::EnvFilter;

/// Log to stderr so `--json` output on stdout stays machine-readable.
/// Filter comes from `PAYOFF_LOG` (e.g. `PAYOFF_LOG=payoff_core=debug`), default `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("PAYOFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

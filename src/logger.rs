use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber. `SWEEPBENCH_LOG` wins over `RUST_LOG`;
/// without either, `verbose` picks between `debug` and `info`.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var("SWEEPBENCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    // Output stays on stderr so `show --format json` can be piped.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

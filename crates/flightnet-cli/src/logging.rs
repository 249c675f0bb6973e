use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber; `RUST_LOG` overrides `default_filter`.
///
/// Stdout carries the report, so diagnostics never go there.
pub fn init(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

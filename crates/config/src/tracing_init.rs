use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise `default_level`
/// applies. The binary feeds `default_level` from the `LOG_LEVEL`
/// config value, so there is no separate env lookup here.
pub fn init_tracing(default_level: &str) {
    fmt()
        .with_env_filter(build_filter(default_level))
        .with_target(true)
        .init();
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configure tracing once at application startup for the entire process.
///
/// Verbosity comes from `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=order_desk::app_system::prep_timer=debug,info cargo run
/// ```
///
/// A second call is a no-op, so tests and embedders can call it freely.
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .try_init();
}

//! Tracing initialization.

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise uses the given default level
/// string (e.g. `"info"`). Safe to call once per process; subsequent calls
/// are ignored rather than panicking so tests can call it freely.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

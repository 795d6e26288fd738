use std::fs;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging, plus JSON file logging when `log_dir` is set.
///
/// Console output goes to stderr so the `OK:` status lines on stdout stay
/// clean for callers that capture them.
pub fn init_logging(log_dir: Option<&Path>) {
    let file_layer = log_dir.and_then(|dir| {
        // A log directory we cannot create just disables file logging
        fs::create_dir_all(dir).ok()?;
        let file_appender = tracing_appender::rolling::daily(dir, "vendor_tables.log");
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        // We need to keep the guard alive so logs are flushed on exit
        std::mem::forget(guard);
        Some(fmt::layer().json().with_writer(non_blocking_writer))
    });

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise info for our crate, warn elsewhere
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vendor_tables=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();
}

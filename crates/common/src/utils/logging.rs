use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the service.
///
/// Honors `RUST_LOG` when set and otherwise defaults to info-level output
/// for the service and the HTTP layers. Logs go to stdout so container
/// runtimes that hide stderr still show them. Safe to call more than once;
/// later calls are no-ops.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

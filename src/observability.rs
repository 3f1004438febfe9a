//! Logging setup for the front-ends and a [`ClientLogger`] that feeds `tracing`.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::client_logger::ClientLogger;
use crate::error::Error;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "MINCA_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "minca=warn";

/// Installs a stderr subscriber filtered by [`LOG_ENV`] or `RUST_LOG`.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Reports every request through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ClientLogger for TracingLogger {
    fn log_request(&self, method: &str, path: &str) {
        tracing::trace!(method, path, "request");
    }

    fn log_response(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        tracing::debug!(
            method,
            path,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "response"
        );
    }

    fn log_failure(&self, method: &str, path: &str, error: &Error) {
        tracing::info!(method, path, error = %error, "request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        TracingLogger.log_response("GET", "/chat", 200, Duration::from_millis(3));
        TracingLogger.log_failure("GET", "/chat", &Error::api(500, "boom"));
    }
}

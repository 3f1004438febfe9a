//! Logging trait for Minca client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! every request passing through the [`MincaClient`](crate::MincaClient).

use std::time::Duration;

use crate::error::Error;

/// A trait for logging Minca client operations.
///
/// Implement this trait to record every request the client issues along with
/// its outcome.
///
/// # Example
///
/// ```rust,ignore
/// use minca::{ClientLogger, Error};
/// use std::sync::Mutex;
/// use std::time::Duration;
///
/// struct AuditLog {
///     lines: Mutex<Vec<String>>,
/// }
///
/// impl ClientLogger for AuditLog {
///     fn log_response(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
///         let mut lines = self.lines.lock().unwrap();
///         lines.push(format!("{method} {path} -> {status} in {elapsed:?}"));
///     }
///
///     fn log_failure(&self, method: &str, path: &str, error: &Error) {
///         let mut lines = self.lines.lock().unwrap();
///         lines.push(format!("{method} {path} failed: {error}"));
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request about to be sent.
    ///
    /// The default implementation does nothing.
    fn log_request(&self, method: &str, path: &str) {
        let _ = (method, path);
    }

    /// Log a completed response, successful or not.
    ///
    /// This method is called once per request that reached the server.
    fn log_response(&self, method: &str, path: &str, status: u16, elapsed: Duration);

    /// Log a request that failed.
    ///
    /// Called for transport failures and for non-2xx responses, after the
    /// response body has been turned into an [`Error`].
    fn log_failure(&self, method: &str, path: &str, error: &Error);
}

//! Ctrl+C handling for the front-ends.
//!
//! A front-end arms the interrupt with a view's [`CancellationToken`] while a
//! send or upload is running.  Ctrl+C then cancels that token.  At the prompt
//! the line editor sees Ctrl+C itself, so a disarmed interrupt does nothing.

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Shared slot for the token Ctrl+C should cancel.
#[derive(Debug, Default, Clone)]
pub struct Interrupt {
    armed: Arc<Mutex<Option<CancellationToken>>>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interrupt and installs it as the process's Ctrl+C handler.
    pub fn install() -> Result<Self> {
        let interrupt = Self::new();
        let handler = interrupt.clone();
        ctrlc::set_handler(move || {
            handler.trigger();
        })
            .map_err(|err| Error::io("failed to install Ctrl+C handler", std::io::Error::other(err)))?;
        Ok(interrupt)
    }

    /// Cancels `token` on the next Ctrl+C.
    pub fn arm(&self, token: CancellationToken) {
        if let Ok(mut armed) = self.armed.lock() {
            *armed = Some(token);
        }
    }

    pub fn disarm(&self) {
        if let Ok(mut armed) = self.armed.lock() {
            *armed = None;
        }
    }

    /// Cancels the armed token, if any; returns whether one was armed.
    pub fn trigger(&self) -> bool {
        let token = self.armed.lock().ok().and_then(|mut armed| armed.take());
        match token {
            Some(token) => {
                tracing::debug!("interrupted");
                token.cancel();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_cancels_armed_token_once() {
        let interrupt = Interrupt::new();
        assert!(!interrupt.trigger());
        let token = CancellationToken::new();
        interrupt.arm(token.clone());
        assert!(interrupt.trigger());
        assert!(token.is_cancelled());
        assert!(!interrupt.trigger());
    }

    #[test]
    fn installed_handler_shares_the_slot() {
        // The only test that installs a process-wide handler.
        let interrupt = Interrupt::install().unwrap();
        let token = CancellationToken::new();
        interrupt.clone().arm(token.clone());
        assert!(interrupt.trigger());
        assert!(token.is_cancelled());
    }

    #[test]
    fn disarm_leaves_token_alone() {
        let interrupt = Interrupt::new();
        let token = CancellationToken::new();
        interrupt.arm(token.clone());
        interrupt.disarm();
        assert!(!interrupt.trigger());
        assert!(!token.is_cancelled());
    }
}

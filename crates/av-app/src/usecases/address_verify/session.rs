use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use av_core::{SessionId, TransportKind};
use uuid::Uuid;

/// Liveness of the session an attempt was started from.
///
/// Closing the dialog does not cancel a device call that is already running;
/// it marks the token abandoned so the eventual result is dropped.
#[derive(Debug, Clone, Default)]
pub struct AttemptToken {
    abandoned: Arc<AtomicBool>,
}

impl AttemptToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

/// Transient state from opening the details dialog until it closes.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    pub id: SessionId,
    pub transport: TransportKind,
    pub token: AttemptToken,
}

impl VerificationSession {
    /// New session on the default (wireless) transport.
    pub fn begin() -> Self {
        Self {
            id: SessionId::from_string(Uuid::new_v4().to_string()),
            transport: TransportKind::default(),
            token: AttemptToken::new(),
        }
    }

    pub fn end(self) {
        self.token.abandon();
    }
}

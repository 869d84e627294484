use std::sync::Arc;

use av_core::DialogStep;
use tokio::sync::{Mutex, MutexGuard};

use crate::usecases::address_verify::session::VerificationSession;

#[derive(Debug, Default)]
struct DialogState {
    step: DialogStep,
    session: Option<VerificationSession>,
}

/// Shared dialog context containing step, session and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes transitions so one event is fully applied
///   (transition + actions + state update) before the next is looked at.
/// - `state`: short reads/writes; never held across an await on a port.
#[derive(Debug, Clone, Default)]
pub struct AddressVerifyContext {
    state: Arc<Mutex<DialogState>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl AddressVerifyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    pub async fn step(&self) -> DialogStep {
        self.state.lock().await.step
    }

    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_step(&self, step: DialogStep) {
        self.state.lock().await.step = step;
    }

    pub async fn session(&self) -> Option<VerificationSession> {
        self.state.lock().await.session.clone()
    }

    /// Replace the session, returning the previous one.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn replace_session(
        &self,
        session: Option<VerificationSession>,
    ) -> Option<VerificationSession> {
        std::mem::replace(&mut self.state.lock().await.session, session)
    }

    /// Apply `f` to the current session, if any.
    pub async fn update_session<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut VerificationSession),
    {
        match self.state.lock().await.session.as_mut() {
            Some(session) => {
                f(session);
                true
            }
            None => false,
        }
    }
}

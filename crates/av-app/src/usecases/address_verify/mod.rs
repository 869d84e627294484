//! Address verification use case.
//!
//! This module exposes the dialog orchestrator and the executor that runs a
//! single verification attempt.

mod busy;
mod context;
pub mod executor;
pub mod orchestrator;
mod session;

pub use busy::{BusyFlag, BusyGuard};
pub use executor::{ExecutorError, PendingAttempt, VerificationExecutor, VerificationRequest};
pub use orchestrator::{AddressVerifyError, AddressVerifyOrchestrator};
pub use session::{AttemptToken, VerificationSession};

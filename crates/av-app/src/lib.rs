//! Address verification orchestration layer
//!
//! This crate drives the address dialog state machine from `av-core` and
//! performs its side effects: device calls, error dialogs and UI updates.

pub mod usecases;

pub use usecases::address_verify::{
    AddressVerifyError, AddressVerifyOrchestrator, VerificationExecutor,
};

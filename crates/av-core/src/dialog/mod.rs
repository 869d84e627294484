//! Address dialog domain module.
//!
//! This module defines the dialog step machine and the transport policy it
//! consults.

pub mod negotiator;
pub mod state_machine;
mod view;

pub use negotiator::{NextStep, TransportNegotiator};
pub use state_machine::{
    DialogAction, DialogEvent, DialogStateMachine, DialogStep, TransitionContext,
};
pub use view::AddressDialogView;

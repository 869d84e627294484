//! Port interfaces for the application layer
//!
//! Ports define the contract between the verification flow and the
//! collaborators it does not own: the wallet's address index, the hardware
//! integration layer, the localized dialog renderer and the UI surface.
//! Each is implemented outside the core (infra adapters, or fakes in tests).

pub mod address_index;
pub mod device_verifier;
pub mod dialog_event;
pub mod error_presenter;

pub use address_index::AddressIndexPort;
pub use device_verifier::DeviceVerifierPort;
pub use dialog_event::DialogEventPort;
pub use error_presenter::{ErrorPresenterPort, LocaleContext};

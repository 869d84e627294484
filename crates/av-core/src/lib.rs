//! # av-core
//!
//! Core domain models and pure flow logic for verifying a wallet address on a
//! hardware signing device.
//!
//! This crate contains no infrastructure: the dialog state machine, the
//! transport negotiation policy and the identity store are plain values, and
//! every collaborator is reached through a port.

pub mod address;
pub mod config;
pub mod dialog;
pub mod hw;
pub mod ids;
pub mod platform;
pub mod ports;
pub mod verification;
pub mod wallet;

// Re-export commonly used types at the crate root
pub use address::{AddressRecord, AddressingInfo};
pub use config::AppConfig;
pub use dialog::{DialogEvent, DialogStep};
pub use hw::{DeviceIdentity, DeviceIdentityStore, HardwareDeviceInfo, TransportKind};
pub use ids::{SerialDeviceHandle, SessionId, WirelessDeviceId};
pub use platform::Platform;
pub use verification::VerificationOutcome;
pub use wallet::WalletMeta;

//! Hardware signing device description and transport identities.

mod identity_store;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::ids::{SerialDeviceHandle, WirelessDeviceId};

pub use identity_store::DeviceIdentityStore;

/// Link used to reach the device. Exactly one per verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// Short-range wireless (BLE).
    Wireless,
    /// Persistent serial/USB link.
    Serial,
}

impl Default for TransportKind {
    fn default() -> Self {
        TransportKind::Wireless
    }
}

impl Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Wireless => write!(f, "wireless"),
            TransportKind::Serial => write!(f, "serial"),
        }
    }
}

/// Transport-specific handle addressing one paired device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceIdentity {
    Wireless(WirelessDeviceId),
    Serial(SerialDeviceHandle),
}

impl DeviceIdentity {
    pub fn kind(&self) -> TransportKind {
        match self {
            DeviceIdentity::Wireless(_) => TransportKind::Wireless,
            DeviceIdentity::Serial(_) => TransportKind::Serial,
        }
    }
}

/// Capabilities reported by the device when it was first paired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwFeatures {
    pub vendor: String,
    pub model: String,
    pub supports_wireless: bool,
    pub supports_serial: bool,
}

/// Hardware device as known to the wallet: features plus any identities
/// learned so far. Either identity, both, or neither may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareDeviceInfo {
    pub features: HwFeatures,
    pub wireless_id: Option<WirelessDeviceId>,
    pub serial_handle: Option<SerialDeviceHandle>,
}

impl HardwareDeviceInfo {
    pub fn identity(&self, kind: TransportKind) -> Option<DeviceIdentity> {
        match kind {
            TransportKind::Wireless => self.wireless_id.clone().map(DeviceIdentity::Wireless),
            TransportKind::Serial => self.serial_handle.clone().map(DeviceIdentity::Serial),
        }
    }

    /// Copy of this info with identities from `store` taking precedence.
    pub fn with_identities(&self, store: &DeviceIdentityStore) -> Self {
        let mut info = self.clone();
        if let Some(DeviceIdentity::Wireless(id)) = store.get(TransportKind::Wireless) {
            info.wireless_id = Some(id);
        }
        if let Some(DeviceIdentity::Serial(handle)) = store.get(TransportKind::Serial) {
            info.serial_handle = Some(handle);
        }
        info
    }
}

use std::sync::{PoisonError, RwLock};

use crate::hw::{DeviceIdentity, HardwareDeviceInfo, TransportKind};
use crate::ids::{SerialDeviceHandle, WirelessDeviceId};

/// Session-scoped identities, one slot per transport.
///
/// Slots are overwritten on every set (last write wins) and never persisted.
/// Each slot is an independent value cell so a reader never observes a
/// partially written identity.
#[derive(Debug, Default)]
pub struct DeviceIdentityStore {
    wireless: RwLock<Option<WirelessDeviceId>>,
    serial: RwLock<Option<SerialDeviceHandle>>,
}

impl DeviceIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with whatever identities `info` already carries.
    pub fn from_device_info(info: &HardwareDeviceInfo) -> Self {
        Self {
            wireless: RwLock::new(info.wireless_id.clone()),
            serial: RwLock::new(info.serial_handle.clone()),
        }
    }

    pub fn set_wireless(&self, id: WirelessDeviceId) {
        #[cfg(feature = "tracing")]
        tracing::debug!(wireless_id = %id, "wireless device identity stored");
        *self.wireless.write().unwrap_or_else(PoisonError::into_inner) = Some(id);
    }

    pub fn set_serial(&self, handle: SerialDeviceHandle) {
        #[cfg(feature = "tracing")]
        tracing::debug!(serial_handle = %handle, "serial device handle stored");
        *self.serial.write().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    pub fn set(&self, identity: DeviceIdentity) {
        match identity {
            DeviceIdentity::Wireless(id) => self.set_wireless(id),
            DeviceIdentity::Serial(handle) => self.set_serial(handle),
        }
    }

    pub fn get(&self, kind: TransportKind) -> Option<DeviceIdentity> {
        match kind {
            TransportKind::Wireless => self
                .wireless
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .map(DeviceIdentity::Wireless),
            TransportKind::Serial => self
                .serial
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .map(DeviceIdentity::Serial),
        }
    }

    pub fn is_known(&self, kind: TransportKind) -> bool {
        self.get(kind).is_some()
    }
}

//!
//! Hardware integration port.
//!
//! The call may take arbitrarily long (the user has to confirm on the device)
//! and may fail for device-specific reasons.

use async_trait::async_trait;

use crate::address::AddressingInfo;
use crate::hw::{HardwareDeviceInfo, TransportKind};
use crate::verification::DeviceVerifyError;
use crate::wallet::WalletImplementationId;

/// Shows `address` on the device and waits for the user's answer.
#[async_trait]
pub trait DeviceVerifierPort: Send + Sync {
    async fn verify_address(
        &self,
        implementation: WalletImplementationId,
        address: &str,
        addressing: &AddressingInfo,
        device: &HardwareDeviceInfo,
        transport: TransportKind,
    ) -> Result<(), DeviceVerifyError>;
}

//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifier of a paired device on the short-range wireless transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WirelessDeviceId(String);

/// Handle of a device attached over the serial/USB transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerialDeviceHandle(String);

/// Identifier of one verification session (details dialog lifetime).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl_id!(WirelessDeviceId, SerialDeviceHandle, SessionId);

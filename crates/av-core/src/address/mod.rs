//! Address records and the derivation metadata that proves ownership.

mod path;

use serde::{Deserialize, Serialize};

pub use path::{format_path, harden, AddressChain, HARDENED};

/// One row of the wallet's receive address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: String,
    /// Zero-based index on the external chain.
    pub index: u32,
    pub is_used: bool,
}

impl AddressRecord {
    pub fn new(address: impl Into<String>, index: u32, is_used: bool) -> Self {
        Self {
            address: address.into(),
            index,
            is_used,
        }
    }
}

/// Derivation metadata the device needs to re-derive an address.
///
/// `path` holds the full BIP32 path (hardened levels already offset by
/// [`HARDENED`]); `start_level` is the depth of the first element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressingInfo {
    pub path: Vec<u32>,
    pub start_level: u32,
}

impl AddressingInfo {
    /// Addressing for `index` on `chain` of `account`, starting at the root.
    pub fn for_address(
        purpose: u32,
        coin_type: u32,
        account: u32,
        chain: AddressChain,
        index: u32,
    ) -> Self {
        Self {
            path: vec![
                harden(purpose),
                harden(coin_type),
                harden(account),
                chain.as_u32(),
                index,
            ],
            start_level: 1,
        }
    }
}

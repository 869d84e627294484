use serde::{Deserialize, Serialize};

use crate::wallet::{WalletImplementationId, COIN_TYPE};

/// Offset marking a hardened BIP32 index.
pub const HARDENED: u32 = 0x8000_0000;

pub fn harden(index: u32) -> u32 {
    index | HARDENED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressChain {
    External,
    Internal,
}

impl AddressChain {
    pub fn as_u32(&self) -> u32 {
        match self {
            AddressChain::External => 0,
            AddressChain::Internal => 1,
        }
    }
}

/// Human readable derivation path, e.g. `m/1852'/1815'/0'/0/3`.
pub fn format_path(
    account: u32,
    chain: AddressChain,
    index: u32,
    implementation: WalletImplementationId,
) -> String {
    format!(
        "m/{}'/{}'/{}'/{}/{}",
        implementation.purpose(),
        COIN_TYPE,
        account,
        chain.as_u32(),
        index
    )
}

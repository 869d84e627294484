use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use av_core::address::{AddressChain, AddressingInfo};
use av_core::ports::AddressIndexPort;
use av_core::wallet::{WalletMeta, COIN_TYPE};

/// Address index kept in memory for the lifetime of the wallet session.
#[derive(Debug, Default)]
pub struct InMemoryAddressIndex {
    entries: RwLock<HashMap<String, AddressingInfo>>,
}

impl InMemoryAddressIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: impl Into<String>, info: AddressingInfo) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), info);
    }

    /// Record an address generated on `chain` of account 0 of `wallet`.
    pub fn record_generated(
        &self,
        wallet: &WalletMeta,
        chain: AddressChain,
        address: impl Into<String>,
        index: u32,
    ) {
        let address = address.into();
        let info = AddressingInfo::for_address(
            wallet.implementation_id.purpose(),
            COIN_TYPE,
            0,
            chain,
            index,
        );
        debug!(%address, index, ?chain, "address recorded in index");
        self.insert(address, info);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AddressIndexPort for InMemoryAddressIndex {
    fn addressing_info(&self, address: &str) -> Option<AddressingInfo> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
    }
}

//! Wallet metadata consumed by the verification flow.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// BIP44 purpose used by legacy (Byron era) wallets.
pub const PURPOSE_BYRON: u32 = 44;
/// CIP-1852 purpose used by Shelley era wallets.
pub const PURPOSE_SHELLEY: u32 = 1852;
/// SLIP-44 coin type registered for ADA.
pub const COIN_TYPE: u32 = 1815;

/// Wallet implementation variant. Determines the derivation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletImplementationId {
    HaskellByron,
    HaskellShelley,
    HaskellShelley24,
    JormungandrItn,
}

impl WalletImplementationId {
    pub fn is_byron(&self) -> bool {
        matches!(self, WalletImplementationId::HaskellByron)
    }

    /// Derivation purpose (unhardened) for addresses of this wallet.
    pub fn purpose(&self) -> u32 {
        if self.is_byron() {
            PURPOSE_BYRON
        } else {
            PURPOSE_SHELLEY
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown wallet implementation id: {0}")]
pub struct UnknownWalletImplementation(pub String);

impl FromStr for WalletImplementationId {
    type Err = UnknownWalletImplementation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "haskell-byron" => Ok(WalletImplementationId::HaskellByron),
            "haskell-shelley" => Ok(WalletImplementationId::HaskellShelley),
            "haskell-shelley-24" => Ok(WalletImplementationId::HaskellShelley24),
            "jormungandr-itn" => Ok(WalletImplementationId::JormungandrItn),
            other => Err(UnknownWalletImplementation(other.to_string())),
        }
    }
}

impl Display for WalletImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletImplementationId::HaskellByron => write!(f, "haskell-byron"),
            WalletImplementationId::HaskellShelley => write!(f, "haskell-shelley"),
            WalletImplementationId::HaskellShelley24 => write!(f, "haskell-shelley-24"),
            WalletImplementationId::JormungandrItn => write!(f, "jormungandr-itn"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    Mainnet,
    Testnet,
}

/// Read-only wallet description passed to path formatting and to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletMeta {
    pub name: String,
    pub implementation_id: WalletImplementationId,
    pub network_id: NetworkId,
    pub is_hw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implementation_id_round_trips_through_its_string_form() {
        for id in [
            WalletImplementationId::HaskellByron,
            WalletImplementationId::HaskellShelley,
            WalletImplementationId::HaskellShelley24,
            WalletImplementationId::JormungandrItn,
        ] {
            assert_eq!(id.to_string().parse::<WalletImplementationId>(), Ok(id));
        }
    }

    #[test]
    fn only_byron_uses_bip44_purpose() {
        assert_eq!(WalletImplementationId::HaskellByron.purpose(), 44);
        assert_eq!(WalletImplementationId::HaskellShelley.purpose(), 1852);
        assert_eq!(WalletImplementationId::HaskellShelley24.purpose(), 1852);
        assert_eq!(WalletImplementationId::JormungandrItn.purpose(), 1852);
    }

    #[test]
    fn unknown_implementation_id_is_rejected() {
        let err = "haskell-goguen".parse::<WalletImplementationId>().unwrap_err();
        assert_eq!(err, UnknownWalletImplementation("haskell-goguen".to_string()));
    }
}

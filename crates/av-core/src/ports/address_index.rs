use crate::address::AddressingInfo;

/// Wallet-side index of generated addresses.
pub trait AddressIndexPort: Send + Sync {
    /// Addressing info for `address`, or `None` if the wallet never
    /// generated it.
    fn addressing_info(&self, address: &str) -> Option<AddressingInfo>;
}

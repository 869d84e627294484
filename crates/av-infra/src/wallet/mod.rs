mod address_index;

pub use address_index::InMemoryAddressIndex;

//! Business logic use cases

pub mod address_verify;

//! # Pure Data Module / 纯数据模块
//!
//! Configuration data structures and their TOML mapping. No validation and
//! no default calculation beyond "missing means empty/false".

mod app_config;

pub use app_config::{AppConfig, HardwareWalletConfig};

//! Infrastructure adapters for address verification: configuration loading,
//! tracing bootstrap, the in-memory address index and headless UI ports.

pub mod bootstrap;
pub mod config;
pub mod ui;
pub mod wallet;

pub use config::{default_config_path, load_config};
pub use ui::{BroadcastDialogEvents, TracingErrorPresenter};
pub use wallet::InMemoryAddressIndex;

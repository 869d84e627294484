//! Headless implementations of the UI-facing ports.

mod dialog_events;
mod error_presenter;

pub use dialog_events::BroadcastDialogEvents;
pub use error_presenter::TracingErrorPresenter;

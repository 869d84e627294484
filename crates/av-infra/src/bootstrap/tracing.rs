//! Tracing configuration
//!
//! Initializes the `tracing-subscriber` registry used by every crate of the
//! workspace. `RUST_LOG` overrides the defaults below.

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug for the workspace crates
/// - **Production**: info for the workspace crates
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        "warn".to_string(),
        format!("av_core={level}"),
        format!("av_app={level}"),
        format!("av_infra={level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// ## Errors
///
/// Returns `Err` if a global subscriber is already registered (call once).
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing subscriber: {err}"))
}

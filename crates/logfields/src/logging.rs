//! Logging — tracing subscriber setup for binaries and tests that use these helpers.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "logfields=info,chartprep=info";

/// Initialise the tracing / logging subsystem.
///
/// Honours `RUST_LOG`. A subscriber installed earlier (by the caller or a
/// previous call) is left in place.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::debug!("Logging initialised");
    }
}

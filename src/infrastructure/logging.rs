//! Logging setup for the service.
//!
//! Structured console logging through `tracing`; the per-container drop
//! reports from the parser ride the same subscriber, which is the engine's
//! observability side-channel.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise. Call once
/// at startup; a second call panics, which is the desired loud failure for
/// a double initialization.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter applied when neither an explicit directive nor `RUST_LOG` is usable.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from an explicit directive, then `RUST_LOG`.
///
/// Blank or unparsable directives fall through to the next source, and
/// finally to [`DEFAULT_FILTER`].
#[must_use]
pub fn build_filter(explicit: Option<&str>) -> EnvFilter {
    let from_env = std::env::var("RUST_LOG").ok();
    [explicit, from_env.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .find_map(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, writing to stderr.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init(explicit: Option<&str>) {
    if let Err(err) = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(build_filter(explicit))
        .try_init()
    {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

//! Telemetry helpers for widgets embedding `timeline-range`.
//!
//! The controller logs through `tracing` under the `timeline_range` target:
//! lifecycle changes (construction, options, animation start/finish, live
//! mode, destroy) at `debug`, per-gesture and per-notification detail at
//! `trace`, and dropped timer work at `warn`. Nothing is installed unless the
//! host asks for it.

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "timeline_range=info";

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

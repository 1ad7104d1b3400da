//! Telemetry helpers for applications embedding `canvas-charts`.
//!
//! The scales and elements only emit `tracing` events; installing a subscriber
//! is left to the host. `init_default_tracing` is a convenience for demos and
//! tests that want fit-loop diagnostics on stderr.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (falling back to `default_filter`) when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_tracing_with_default_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// Same as [`init_tracing_with_default_filter`] with an `info` default.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

//! Opt-in `tracing` setup for hosts and the `bar-chart-render` binary.
//!
//! Library code only emits events; nothing is printed unless a subscriber is
//! installed, either here or by the host.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "bar_chart_rs=info";
/// Filter for verbose runs: layout and import decisions at `debug`.
pub const VERBOSE_FILTER: &str = "bar_chart_rs=debug";

/// Installs a compact stderr subscriber with [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `fallback_filter`.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}

#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! Every crate in the workspace emits `tracing` events at its state
//! transitions. Browsers have no subscriber by default, so events are free
//! there. Native hosts and test runs can install a JSON subscriber with the
//! `tracing-json` feature:
//!
//! ```text
//! PAGEFX_LOG=pagefx_core=trace cargo test --features tracing-json
//! ```

/// Environment variable read for the filter directive.
pub const LOG_ENV: &str = "PAGEFX_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "pagefx_core=info,pagefx_web=info";

/// Install a global JSON subscriber filtered by [`LOG_ENV`].
///
/// Returns `false` when a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_install_reports_false() {
        let _ = init_subscriber();
        assert!(!init_subscriber());
    }
}

#![forbid(unsafe_code)]

//! Page configuration supplied by the host.
//!
//! The host passes an optional JSON object when it creates the controller.
//! Every key is optional; missing keys take the defaults the landing page
//! ships with. Keys use camelCase to match the JavaScript side.
//!
//! ```json
//! { "counterDurationMs": 1500, "statsThreshold": 0.6, "locale": "de-DE" }
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::format::NumberLocale;
use crate::tween::DEFAULT_DURATION;

/// Longest accepted counter tween, in milliseconds (ten minutes).
pub const MAX_COUNTER_DURATION_MS: f64 = 600_000.0;

/// Errors from parsing or validating a [`PageConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong type.
    Json(String),
    /// A visibility threshold outside `[0, 1]`.
    InvalidThreshold { field: &'static str, value: f64 },
    /// A duration outside `[0, MAX_COUNTER_DURATION_MS]` or not finite.
    InvalidDuration(f64),
    /// A scroll ratio outside `[0, 1]`.
    InvalidRatio(f64),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "config JSON error: {msg}"),
            Self::InvalidThreshold { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
            Self::InvalidDuration(ms) => {
                write!(
                    f,
                    "counterDurationMs must be within [0, {MAX_COUNTER_DURATION_MS}], got {ms}"
                )
            }
            Self::InvalidRatio(ratio) => {
                write!(f, "backToTopRatio must be within [0, 1], got {ratio}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Landing page tuning knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Counter tween length in milliseconds.
    pub counter_duration_ms: f64,
    /// Visible fraction of the stats section that starts the counters.
    pub stats_threshold: f64,
    /// Selector for the observed stats container.
    pub stats_section: String,
    /// Selector for the numeric display elements.
    pub stat_value: String,
    /// Height of the fixed header subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Fraction of the scrollable height after which back-to-top shows.
    pub back_to_top_ratio: f64,
    /// Visible fraction at which cards fade in.
    pub reveal_threshold: f64,
    /// Number grouping locale tag. `None` uses the host language.
    pub locale: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: 2000.0,
            stats_threshold: 0.5,
            stats_section: ".stats-section".to_owned(),
            stat_value: ".stat-value".to_owned(),
            header_offset: 64.0,
            back_to_top_ratio: 0.2,
            reveal_threshold: 0.1,
            locale: None,
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON object. Empty input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse like [`from_json`](Self::from_json), falling back to the defaults
    /// (with a warning) when the host sent something unusable.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            warn!(%err, "rejecting page config, using defaults");
            Self::default()
        })
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_COUNTER_DURATION_MS).contains(&self.counter_duration_ms) {
            return Err(ConfigError::InvalidDuration(self.counter_duration_ms));
        }
        check_unit("statsThreshold", self.stats_threshold)?;
        check_unit("revealThreshold", self.reveal_threshold)?;
        if !(0.0..=1.0).contains(&self.back_to_top_ratio) {
            return Err(ConfigError::InvalidRatio(self.back_to_top_ratio));
        }
        Ok(())
    }

    /// Counter tween length.
    ///
    /// Fields are public, so this does not assume [`validate`](Self::validate)
    /// ran: negative values give zero, and values a [`Duration`] cannot hold
    /// give the default length.
    #[must_use]
    pub fn counter_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.counter_duration_ms.max(0.0) / 1000.0)
            .unwrap_or(DEFAULT_DURATION)
    }

    /// Grouping locale, preferring the configured tag over `host_language`.
    #[must_use]
    pub fn number_locale(&self, host_language: Option<&str>) -> NumberLocale {
        self.locale
            .as_deref()
            .or(host_language)
            .map(NumberLocale::from_tag)
            .unwrap_or_default()
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}

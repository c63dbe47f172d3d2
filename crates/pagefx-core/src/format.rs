#![forbid(unsafe_code)]

//! Locale-aware integer formatting for counter frames.
//!
//! Counter values are whole numbers by the time they are displayed. Grouping
//! follows CLDR through `icu_decimal`, so minimum grouping digits (`es`:
//! `1000` but `12.500`) and non-uniform group sizes (`en-IN`: `1,00,000`)
//! come out the way the browser's `toLocaleString()` renders them.

use std::sync::Arc;

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_locale_core::{Locale, locale};
use tracing::debug;

/// Tag used when the host supplies none or an unparseable one.
const FALLBACK_TAG: &str = "en";

/// Integer formatter for one display locale.
///
/// Cheap to clone; the CLDR data is shared.
#[derive(Debug, Clone)]
pub struct NumberLocale {
    tag: String,
    formatter: Arc<DecimalFormatter>,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::english()
    }
}

impl PartialEq for NumberLocale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl NumberLocale {
    /// English grouping (`12,500`).
    #[must_use]
    pub fn english() -> Self {
        Self::for_locale(locale!("en"))
            .unwrap_or_else(|| unreachable!("compiled CLDR data always covers en"))
    }

    /// Resolve a BCP-47 language tag (`"en-US"`, `"de_DE"`, `"fr"`).
    ///
    /// Empty or malformed tags fall back to English grouping. Well-formed
    /// tags without CLDR data use the root locale's grouping.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let parsed = normalized.parse::<Locale>().ok();
        match parsed.and_then(Self::for_locale) {
            Some(resolved) => resolved,
            None => {
                debug!(tag, "unusable locale tag, falling back to {FALLBACK_TAG}");
                Self::english()
            }
        }
    }

    fn for_locale(locale: Locale) -> Option<Self> {
        let tag = locale.to_string();
        let formatter = DecimalFormatter::try_new(locale.into(), Default::default()).ok()?;
        Some(Self {
            tag,
            formatter: Arc::new(formatter),
        })
    }

    /// Canonical tag of the resolved locale.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Format a whole number with the locale's grouping.
    ///
    /// Any fractional part is dropped. Non-finite values render as `∞`,
    /// `-∞`, or `NaN`.
    #[must_use]
    pub fn format_grouped(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
        }

        let whole = value.trunc();
        let whole = if whole == 0.0 { 0.0 } else { whole };
        match format!("{whole:.0}").parse::<Decimal>() {
            Ok(decimal) => self.formatter.format_to_string(&decimal),
            Err(_) => format!("{whole:.0}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_english() {
        let en = NumberLocale::english();
        assert_eq!(en.format_grouped(0.0), "0");
        assert_eq!(en.format_grouped(999.0), "999");
        assert_eq!(en.format_grouped(1_000.0), "1,000");
        assert_eq!(en.format_grouped(12_500.0), "12,500");
        assert_eq!(en.format_grouped(3_500_000.0), "3,500,000");
        assert_eq!(en.format_grouped(123_456_789.0), "123,456,789");
    }

    #[test]
    fn negative_values() {
        assert_eq!(NumberLocale::english().format_grouped(-1_234.0), "-1,234");
        assert_eq!(NumberLocale::english().format_grouped(-0.4), "0");
    }

    #[test]
    fn fraction_is_dropped() {
        assert_eq!(NumberLocale::english().format_grouped(1_999.9), "1,999");
    }

    #[test]
    fn values_beyond_i64() {
        assert_eq!(
            NumberLocale::english().format_grouped(1e21),
            "1,000,000,000,000,000,000,000"
        );
    }

    #[test]
    fn non_finite_values() {
        let en = NumberLocale::english();
        assert_eq!(en.format_grouped(f64::NAN), "NaN");
        assert_eq!(en.format_grouped(f64::INFINITY), "∞");
        assert_eq!(en.format_grouped(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn minimum_grouping_digits() {
        let es = NumberLocale::from_tag("es-ES");
        assert_eq!(es.format_grouped(1_000.0), "1000");
        assert_eq!(es.format_grouped(12_500.0), "12.500");

        let pl = NumberLocale::from_tag("pl");
        assert_eq!(pl.format_grouped(1_000.0), "1000");
    }

    #[test]
    fn indian_grouping() {
        let en_in = NumberLocale::from_tag("en-IN");
        assert_eq!(en_in.format_grouped(100_000.0), "1,00,000");
        assert_eq!(en_in.format_grouped(12_345_678.0), "1,23,45,678");
    }

    #[test]
    fn separators_by_locale() {
        assert_eq!(NumberLocale::from_tag("de_DE").format_grouped(12_500.0), "12.500");
        assert_eq!(
            NumberLocale::from_tag("fr-FR").format_grouped(12_500.0),
            "12\u{202F}500"
        );
        assert_eq!(
            NumberLocale::from_tag("de-CH").format_grouped(12_500.0),
            "12\u{2019}500"
        );
    }

    #[test]
    fn unusable_tags_fall_back_to_english() {
        assert_eq!(NumberLocale::from_tag(""), NumberLocale::english());
        assert_eq!(NumberLocale::from_tag("not a locale!"), NumberLocale::english());
        assert_eq!(NumberLocale::from_tag("en-US").format_grouped(12_500.0), "12,500");
    }
}

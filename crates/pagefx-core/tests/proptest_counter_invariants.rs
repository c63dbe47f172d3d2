//! Property-based invariant tests for the stats counter.
//!
//! Verifies:
//! 1. Parsed endpoint equals the comma-stripped number, scaled by K and M
//! 2. Suffix is the text without digits, commas, and periods
//! 3. Tween values are non-decreasing and end at floor(endpoint)
//! 4. The visibility watcher fires at most once for any sample sequence
//! 5. The counter's final text is the grouped endpoint plus suffix

use std::time::Duration;

use pagefx_core::{
    IntersectionSample, NumberLocale, StatsCounter, Tween, VisibilityWatcher, parse_endpoint,
};
use proptest::prelude::*;

fn group(n: u64) -> String {
    NumberLocale::english().format_grouped(n as f64)
}

fn suffix_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "+", "%", "K", "M", "K+", " users", "x", "M+"])
        .prop_map(str::to_owned)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Endpoint parsing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grouped_integer_parses_back(n in 0u64..=10_000_000_000, suffix in suffix_strategy()) {
        let text = format!("{}{}", group(n), suffix);
        let ep = parse_endpoint(&text);

        let mut expected = n as f64;
        if suffix.contains('K') {
            expected *= 1_000.0;
        }
        if suffix.contains('M') {
            expected *= 1_000_000.0;
        }
        prop_assert_eq!(ep.value, expected);
        prop_assert_eq!(ep.suffix, suffix);
    }

    #[test]
    fn decimal_parses_leading_float(whole in 0u32..10_000, frac in 0u32..100) {
        let text = format!("{whole}.{frac:02}%");
        let ep = parse_endpoint(&text);
        let expected: f64 = format!("{whole}.{frac:02}").parse().unwrap();
        prop_assert_eq!(ep.value, expected);
        prop_assert_eq!(ep.suffix, "%");
    }

    #[test]
    fn suffix_never_contains_numeric_chars(text in "\\PC{0,24}") {
        let ep = parse_endpoint(&text);
        prop_assert!(!ep.suffix.chars().any(|c| c.is_ascii_digit() || c == ',' || c == '.'));
        prop_assert!(ep.value >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Tween monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tween_is_monotone_and_exact(
        end in 0u64..=100_000_000,
        mut steps in proptest::collection::vec(0u64..=3_000, 1..40),
    ) {
        steps.sort_unstable();
        let duration = Duration::from_millis(2000);
        let mut tween = Tween::new(0.0, end as f64, duration, "");
        tween.begin(Duration::ZERO);

        let mut last = 0.0;
        for t in steps {
            let frame = tween.sample(Duration::from_millis(t));
            prop_assert!(frame.value >= last, "value went down: {} -> {}", last, frame.value);
            prop_assert!(frame.value <= end as f64);
            last = frame.value;
        }

        let fin = tween.sample(Duration::from_millis(2000));
        if fin.done {
            prop_assert_eq!(fin.value, end as f64);
        }
        let after = Tween::new(0.0, end as f64, duration, "").value_at(1.0);
        prop_assert_eq!(after, end as f64);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. One-shot trigger
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn watcher_fires_at_most_once(ratios in proptest::collection::vec(0.0f64..=1.0, 0..60)) {
        let mut watcher = VisibilityWatcher::default();
        let fired = ratios
            .iter()
            .filter(|&&ratio| watcher.observe(IntersectionSample::visible(ratio)))
            .count();
        prop_assert!(fired <= 1);
        let any_qualifying = ratios.iter().any(|&r| r >= 0.5);
        prop_assert_eq!(fired == 1, any_qualifying);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Counter end state
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counter_ends_on_grouped_endpoint(n in 0u64..=5_000_000, suffix in prop::sample::select(vec!["", "+", "%"])) {
        let text = format!("{}{}", group(n), suffix);
        let mut counter = StatsCounter::new(VisibilityWatcher::default(), vec![text.clone()]);
        prop_assert!(counter.on_visibility(IntersectionSample::visible(1.0), Duration::ZERO));
        prop_assert!(!counter.frame(Duration::from_millis(2000)));
        let shown: Vec<String> = counter.targets().cloned().collect();
        prop_assert_eq!(shown, vec![text]);
    }
}

#![forbid(unsafe_code)]

//! Endpoint parsing for human-readable stat text.
//!
//! A stat element shows text such as `"12,000+"`, `"3.5M"`, or `"98%"`. The
//! counter needs two things from it: the number to count up to, and the
//! literal remainder to append to every frame.
//!
//! # Rules
//! 1. The first run of `[0-9,.]` is the numeric source. Commas are dropped and
//!    the longest leading float prefix is parsed (`"1.2.3"` reads as `1.2`).
//!    No run, or a run without a digit, yields `0.0`.
//! 2. The suffix is the whole (trimmed) text with every digit, comma, and
//!    period removed. It is kept verbatim, unit letters included.
//! 3. `K` anywhere in the text multiplies by 1 000, `M` anywhere multiplies by
//!    1 000 000. Both checks are independent and case-sensitive.
//!
//! Rule 3 together with rule 2 means `"3.5M"` counts to `3,500,000` *and*
//! keeps `"M"` as its suffix. Existing pages depend on that output, so it is
//! reproduced rather than normalized.

use std::sync::OnceLock;

use regex::Regex;

/// Multiplier applied when the text contains `K`.
pub const THOUSAND: f64 = 1_000.0;
/// Multiplier applied when the text contains `M`.
pub const MILLION: f64 = 1_000_000.0;

/// Parsed counter endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Value the counter animates towards.
    pub value: f64,
    /// Literal text appended after the formatted number.
    pub suffix: String,
}

fn numeric_run() -> &'static Regex {
    static RUN: OnceLock<Regex> = OnceLock::new();
    RUN.get_or_init(|| Regex::new(r"[0-9,.]+").expect("numeric run pattern is valid"))
}

#[inline]
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

/// Parse the longest leading float prefix of `digits` (no sign, no exponent).
fn leading_float(digits: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (idx, byte) in digits.bytes().enumerate() {
        match byte {
            b'0'..=b'9' => {
                seen_digit = true;
                end = idx + 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }
    digits[..end].parse::<f64>().unwrap_or(0.0)
}

/// Parse a display element's text into an [`Endpoint`].
#[must_use]
pub fn parse_endpoint(text: &str) -> Endpoint {
    let text = text.trim();

    let mut value = numeric_run()
        .find(text)
        .map(|run| leading_float(&run.as_str().replace(',', "")))
        .unwrap_or(0.0);

    if text.contains('K') {
        value *= THOUSAND;
    }
    if text.contains('M') {
        value *= MILLION;
    }

    let suffix: String = text.chars().filter(|&c| !is_numeric_char(c)).collect();

    Endpoint { value, suffix }
}

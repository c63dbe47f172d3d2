#![forbid(unsafe_code)]

//! Email field border feedback.
//!
//! Focus highlights the field. On blur a non-empty value that does not look
//! like `local@domain.tld` turns the border red; an empty or plausible value
//! restores the neutral border. This is feedback only, nothing is blocked.

use std::sync::OnceLock;

use regex::Regex;

/// Border colour for each tone.
pub const INVALID_BORDER: &str = "hsl(0, 65%, 51%)";
pub const NEUTRAL_BORDER: &str = "var(--border)";
pub const FOCUSED_BORDER: &str = "var(--primary)";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Whether `value` has the `local@domain.tld` shape.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Visual state of the field border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldTone {
    #[default]
    Neutral,
    Focused,
    Invalid,
}

impl FieldTone {
    /// CSS `border-color` for this tone.
    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Self::Neutral => NEUTRAL_BORDER,
            Self::Focused => FOCUSED_BORDER,
            Self::Invalid => INVALID_BORDER,
        }
    }
}

/// Border state for one email input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailField {
    tone: FieldTone,
}

impl EmailField {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tone: FieldTone::Neutral,
        }
    }

    #[must_use]
    pub const fn tone(&self) -> FieldTone {
        self.tone
    }

    pub fn on_focus(&mut self) -> FieldTone {
        self.tone = FieldTone::Focused;
        self.tone
    }

    pub fn on_blur(&mut self, value: &str) -> FieldTone {
        self.tone = if !value.is_empty() && !looks_like_email(value) {
            FieldTone::Invalid
        } else {
            FieldTone::Neutral
        };
        self.tone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("a.b+c@mail.example.org"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("ada example@x.io"));
        assert!(!looks_like_email("@x.io"));
        assert!(!looks_like_email("a@@x.io"));
    }

    #[test]
    fn blur_tones() {
        let mut field = EmailField::new();
        assert_eq!(field.on_focus(), FieldTone::Focused);
        assert_eq!(field.on_blur(""), FieldTone::Neutral);
        assert_eq!(field.on_blur("nope"), FieldTone::Invalid);
        assert_eq!(field.tone().border_color(), INVALID_BORDER);
        assert_eq!(field.on_blur("ok@site.dev"), FieldTone::Neutral);
    }
}

#![forbid(unsafe_code)]

//! Scroll-driven page math: anchor targets, header shadow, back-to-top.

/// Height of the fixed header in CSS pixels.
pub const HEADER_OFFSET: f64 = 64.0;
/// Fraction of the scrollable height after which back-to-top appears.
pub const BACK_TO_TOP_RATIO: f64 = 0.2;
/// Class toggled on the back-to-top control.
pub const BACK_TO_TOP_SHOW_CLASS: &str = "show";
/// Header `box-shadow` while the page is scrolled.
pub const HEADER_SHADOW: &str = "var(--shadow-soft)";
/// Header `box-shadow` at the top of the page.
pub const HEADER_NO_SHADOW: &str = "none";

/// Window scroll measurements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// `window.scrollY`.
    pub scroll_y: f64,
    /// `document.documentElement.scrollHeight`.
    pub scroll_height: f64,
    /// `window.innerHeight`.
    pub inner_height: f64,
}

impl ScrollMetrics {
    /// Maximum scroll distance.
    #[must_use]
    pub fn scrollable(&self) -> f64 {
        (self.scroll_height - self.inner_height).max(0.0)
    }
}

/// Selector for an in-page link, or `None` for a bare `#` or a non-anchor.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

/// Absolute scroll position that puts an element just below the header.
///
/// `element_top` is the element's viewport-relative top edge.
#[must_use]
pub fn anchor_scroll_top(element_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    element_top + page_offset - header_offset
}

/// Header shadow value for a scroll position.
#[must_use]
pub fn header_shadow(scroll_y: f64) -> &'static str {
    if scroll_y <= 0.0 {
        HEADER_NO_SHADOW
    } else {
        HEADER_SHADOW
    }
}

/// Whether the back-to-top control should be shown.
#[must_use]
pub fn back_to_top_visible(metrics: ScrollMetrics, ratio: f64) -> bool {
    metrics.scroll_y > metrics.scrollable() * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#features"), Some("#features"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/pricing"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn anchor_offset_subtracts_header() {
        assert_eq!(anchor_scroll_top(300.0, 1000.0, HEADER_OFFSET), 1236.0);
    }

    #[test]
    fn shadow_only_when_scrolled() {
        assert_eq!(header_shadow(0.0), HEADER_NO_SHADOW);
        assert_eq!(header_shadow(-5.0), HEADER_NO_SHADOW);
        assert_eq!(header_shadow(1.0), HEADER_SHADOW);
    }

    #[test]
    fn back_to_top_threshold() {
        let metrics = |scroll_y| ScrollMetrics {
            scroll_y,
            scroll_height: 3000.0,
            inner_height: 1000.0,
        };
        assert!(!back_to_top_visible(metrics(400.0), BACK_TO_TOP_RATIO));
        assert!(back_to_top_visible(metrics(401.0), BACK_TO_TOP_RATIO));
    }

    #[test]
    fn short_page_shows_after_any_scroll() {
        let m = ScrollMetrics {
            scroll_y: 1.0,
            scroll_height: 500.0,
            inner_height: 800.0,
        };
        assert_eq!(m.scrollable(), 0.0);
        assert!(back_to_top_visible(m, BACK_TO_TOP_RATIO));
    }
}

#![forbid(unsafe_code)]

//! Fade-in for feature and stat cards as they scroll into view.
//!
//! Cards start transparent and shifted down. The first time a card
//! intersects the (bottom-inset) viewport it is revealed; leaving the
//! viewport again does not hide it.

/// Cards that fade in.
pub const REVEAL_SELECTOR: &str = ".feature-card, .stat-item";
/// Observer root margin: trigger 100px before the bottom edge.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
/// Default observer threshold.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Inline style triple applied to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: Option<&'static str>,
}

impl RevealStyle {
    /// Style applied before the card is seen.
    pub const HIDDEN: Self = Self {
        opacity: "0",
        transform: "translateY(30px)",
        transition: Some("opacity 0.5s ease-out, transform 0.5s ease-out"),
    };

    /// Style applied once the card is seen.
    pub const REVEALED: Self = Self {
        opacity: "1",
        transform: "translateY(0)",
        transition: None,
    };
}

/// Per-card reveal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: bool,
}

impl RevealState {
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feed an intersection flag. Returns the style to apply, if any.
    pub fn on_intersection(&mut self, is_intersecting: bool) -> Option<RevealStyle> {
        if is_intersecting && !self.revealed {
            self.revealed = true;
            Some(RevealStyle::REVEALED)
        } else {
            None
        }
    }
}

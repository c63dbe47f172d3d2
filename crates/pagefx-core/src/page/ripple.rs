#![forbid(unsafe_code)]

//! Click ripple geometry for buttons.
//!
//! The ripple is a circle as large as the button's longer side, centred on
//! the click point, scaled up by a CSS animation and removed afterwards.

/// How long a ripple element lives.
pub const RIPPLE_LIFETIME_MS: i32 = 600;

/// Stylesheet text for the ripple keyframes.
pub const RIPPLE_KEYFRAMES: &str = "
    @keyframes ripple {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
";

/// Inline styles shared by every ripple element.
pub const RIPPLE_STYLES: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("border-radius", "50%"),
    ("background-color", "rgba(255, 255, 255, 0.3)"),
    ("transform", "scale(0)"),
    ("animation", "ripple 0.6s ease-out"),
    ("pointer-events", "none"),
];

/// Viewport-relative bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement of one ripple inside its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Diameter in CSS pixels.
    pub size: f64,
    /// Offset from the button's left edge.
    pub left: f64,
    /// Offset from the button's top edge.
    pub top: f64,
}

impl Ripple {
    /// Ripple for a click at (`client_x`, `client_y`) on a button at `rect`.
    #[must_use]
    pub fn from_click(rect: Rect, client_x: f64, client_y: f64) -> Self {
        let size = rect.width.max(rect.height);
        Self {
            size,
            left: client_x - rect.left - size / 2.0,
            top: client_y - rect.top - size / 2.0,
        }
    }

    /// `(property, value)` pairs for width, height, left, and top.
    #[must_use]
    pub fn placement_styles(&self) -> [(&'static str, String); 4] {
        let px = |v: f64| format!("{v}px");
        [
            ("width", px(self.size)),
            ("height", px(self.size)),
            ("left", px(self.left)),
            ("top", px(self.top)),
        ]
    }
}

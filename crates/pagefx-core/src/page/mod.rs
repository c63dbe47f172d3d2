#![forbid(unsafe_code)]

//! Page chrome: the small interactive pieces around the counter.
//!
//! Each submodule is a plain state holder or pure function. The wasm
//! controller reads DOM values, calls in here, and applies the answer.

pub mod email;
pub mod menu;
pub mod reveal;
pub mod ripple;
pub mod scroll;

pub use email::{EmailField, FieldTone};
pub use menu::{MenuEvent, MenuTransition, MobileMenu};
pub use reveal::{RevealState, RevealStyle};
pub use ripple::{Rect, Ripple};
pub use scroll::{
    ScrollMetrics, anchor_scroll_top, anchor_target, back_to_top_visible, header_shadow,
};

/// Transition applied to `<body>` on load, starting from opacity 0.
pub const BODY_FADE_TRANSITION: &str = "opacity 0.3s ease-in";
/// Delay before the body opacity is raised to 1.
pub const BODY_FADE_DELAY_MS: i32 = 100;

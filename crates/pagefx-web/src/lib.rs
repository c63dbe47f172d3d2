#![forbid(unsafe_code)]

//! WASM page controller for the landing page.
//!
//! This crate provides [`PageController`], a `wasm-bindgen`-exported struct
//! that wires [`runner_core::PageRunner`] to the DOM: intersection observers
//! for the stats section and reveal cards, a `requestAnimationFrame` loop for
//! the counter, and the menu, scroll, email, ripple, and form listeners.
//!
//! ```text
//! new PageController(optionsJson)
//!   → query elements once, hold them as explicit handles
//!   → stats section visible (≥ threshold, first time only)
//!       → counters reset to "0" + suffix, rAF loop starts
//!   → each frame: PageRunner::animation_frame(timestamp)
//!   → loop stops when every counter reached its endpoint
//! ```

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PageController;

pub mod runner_core;

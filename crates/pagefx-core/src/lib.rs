#![forbid(unsafe_code)]

//! Core: stats counter tween, visibility trigger, and page chrome state.
//!
//! # Role in pagefx
//! `pagefx-core` owns every decision the landing page makes. It has no
//! browser types: the host (see `pagefx-web`) reads the DOM, feeds plain
//! values in, and writes the returned text and styles back out.
//!
//! # Primary responsibilities
//! - **Endpoint parsing**: turn display text such as `"12,500+"` into a
//!   numeric endpoint plus a verbatim suffix.
//! - **Tweening**: an ease-out counter polled once per animation frame.
//! - **Visibility**: a one-shot trigger for the stats section.
//! - **Page chrome**: mobile menu, anchor scrolling, header shadow,
//!   back-to-top, email field tone, button ripples, and card reveals.
//!
//! # How it fits in the system
//! The host calls [`counter::StatsCounter::on_visibility`] from its
//! intersection callback and [`counter::StatsCounter::frame`] from its
//! `requestAnimationFrame` loop. Nothing here schedules work on its own, so
//! the same event stream always produces the same frames.

pub mod config;
pub mod counter;
pub mod endpoint;
pub mod format;
pub mod logging;
pub mod page;
pub mod tween;
pub mod watcher;

pub use config::{ConfigError, PageConfig};
pub use counter::{DisplayTarget, StatsCounter};
pub use endpoint::{Endpoint, parse_endpoint};
pub use format::NumberLocale;
pub use tween::{Tween, TweenFrame, TweenPhase, ease_out_quad};
pub use watcher::{IntersectionSample, VisibilityWatcher, WatcherState};

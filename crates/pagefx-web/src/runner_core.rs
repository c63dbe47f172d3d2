#![forbid(unsafe_code)]

//! Platform-independent page controller state.
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here: the wasm layer reads
//! the DOM, calls into [`PageRunner`], and applies what comes back.

use core::time::Duration;
use std::collections::VecDeque;

use pagefx_core::page::menu::{MenuEvent, MenuTransition, MobileMenu};
use pagefx_core::page::reveal::{RevealState, RevealStyle};
use pagefx_core::page::scroll::{self, ScrollMetrics};
use pagefx_core::page::{EmailField, FieldTone};
use pagefx_core::{DisplayTarget, IntersectionSample, PageConfig, StatsCounter, VisibilityWatcher};

/// Banner written once the controller is wired up.
pub const LOADED_BANNER: &str = "AI Manager loaded successfully! 🚀";

/// Log lines kept between `take_logs` drains. Older lines are dropped first.
pub const MAX_LOG_LINES: usize = 256;

/// Resolve the constructor's options JSON. A rejected config is logged and
/// replaced by the defaults so the page still gets its behaviours.
#[must_use]
pub fn host_config(options: Option<&str>) -> PageConfig {
    options.map_or_else(PageConfig::default, PageConfig::from_json_or_default)
}

/// Convert a host timestamp in milliseconds (`performance.now()`, rAF
/// timestamps) to a [`Duration`]. Negative and NaN inputs map to zero.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Changes to apply after a scroll event. `None` means "leave as is".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollEffects {
    /// New header `box-shadow` value.
    pub header_shadow: Option<&'static str>,
    /// New back-to-top visibility.
    pub back_to_top: Option<bool>,
}

/// Page controller state for one landing page.
#[derive(Debug)]
pub struct PageRunner<T: DisplayTarget> {
    config: PageConfig,
    counter: StatsCounter<T>,
    menu: MobileMenu,
    email: EmailField,
    cards: Vec<RevealState>,
    header_shadow: &'static str,
    back_to_top_shown: bool,
    frame_loop_active: bool,
    counter_frames: u64,
    logs: VecDeque<String>,
}

impl<T: DisplayTarget> PageRunner<T> {
    /// Create the runner.
    ///
    /// `stat_targets` are the elements matching the stat-value selector.
    /// `has_stats_section` is false when the page has no stats container, in
    /// which case the counter never runs. `host_language` is the browser
    /// language used for number grouping when the config names none.
    #[must_use]
    pub fn new(
        config: PageConfig,
        stat_targets: Vec<T>,
        has_stats_section: bool,
        host_language: Option<&str>,
    ) -> Self {
        let watcher = if has_stats_section {
            VisibilityWatcher::new(config.stats_threshold)
        } else {
            tracing::debug!(selector = %config.stats_section, "no stats section, counter disabled");
            VisibilityWatcher::detached()
        };
        let counter = StatsCounter::new(watcher, stat_targets)
            .with_duration(config.counter_duration())
            .with_locale(config.number_locale(host_language));
        Self {
            config,
            counter,
            menu: MobileMenu::new(),
            email: EmailField::new(),
            cards: Vec::new(),
            header_shadow: scroll::HEADER_NO_SHADOW,
            back_to_top_shown: false,
            frame_loop_active: false,
            counter_frames: 0,
            logs: VecDeque::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The stats counter.
    #[must_use]
    pub fn counter(&self) -> &StatsCounter<T> {
        &self.counter
    }

    /// Whether the stats section still needs intersection samples.
    #[must_use]
    pub fn wants_stats_visibility(&self) -> bool {
        self.counter.watcher().is_armed()
    }

    /// Whether a counter frame loop is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frame_loop_active
    }

    // -- Stats counter -------------------------------------------------------

    /// Feed an intersection sample for the stats section.
    ///
    /// Returns `true` when the host must stop observing the section and
    /// start requesting animation frames.
    pub fn on_stats_visibility(&mut self, sample: IntersectionSample, now: Duration) -> bool {
        if !self.counter.on_visibility(sample, now) {
            return false;
        }
        self.counter_frames = 0;
        self.frame_loop_active = !self.counter.is_empty();
        self.log(format!(
            "stats counter started ({} targets)",
            self.counter.len()
        ));
        self.frame_loop_active
    }

    /// One display-refresh tick. Returns `true` if another frame is needed.
    pub fn animation_frame(&mut self, now: Duration) -> bool {
        if !self.frame_loop_active {
            return false;
        }
        self.counter_frames += 1;
        let running = self.counter.frame(now);
        if !running {
            self.frame_loop_active = false;
            self.log(format!(
                "stats counter finished after {} frames",
                self.counter_frames
            ));
        }
        running
    }

    /// Stop the counter where it is. The frame loop ends on its next tick.
    pub fn cancel_counter(&mut self) {
        if self.frame_loop_active {
            self.counter.cancel();
            self.frame_loop_active = false;
            self.log("stats counter cancelled".to_owned());
        }
    }

    // -- Chrome --------------------------------------------------------------

    /// Feed a mobile menu event.
    pub fn on_menu_event(&mut self, event: &MenuEvent) -> MenuTransition {
        self.menu.handle(event)
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Scroll position for an anchor element, honouring the header offset.
    #[must_use]
    pub fn anchor_scroll_top(&self, element_top: f64, page_offset: f64) -> f64 {
        scroll::anchor_scroll_top(element_top, page_offset, self.config.header_offset)
    }

    /// Feed a window scroll. Only changed values are reported.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> ScrollEffects {
        let mut effects = ScrollEffects::default();

        let shadow = scroll::header_shadow(metrics.scroll_y);
        if shadow != self.header_shadow {
            self.header_shadow = shadow;
            effects.header_shadow = Some(shadow);
        }

        let show = scroll::back_to_top_visible(metrics, self.config.back_to_top_ratio);
        if show != self.back_to_top_shown {
            self.back_to_top_shown = show;
            effects.back_to_top = Some(show);
        }
        effects
    }

    pub fn email_focus(&mut self) -> FieldTone {
        self.email.on_focus()
    }

    pub fn email_blur(&mut self, value: &str) -> FieldTone {
        self.email.on_blur(value)
    }

    /// Register `count` reveal cards, returning the style to apply to each
    /// before it is observed.
    pub fn register_cards(&mut self, count: usize) -> RevealStyle {
        self.cards = vec![RevealState::default(); count];
        RevealStyle::HIDDEN
    }

    /// Feed an intersection flag for card `index`.
    pub fn on_card_intersection(&mut self, index: usize, is_intersecting: bool) -> Option<RevealStyle> {
        self.cards
            .get_mut(index)
            .and_then(|card| card.on_intersection(is_intersecting))
    }

    /// Record an intercepted form submission.
    pub fn on_form_submit(&mut self) {
        self.log("Form submitted (demo mode)".to_owned());
    }

    // -- Logs ----------------------------------------------------------------

    /// Append a host-visible log line, dropping the oldest past
    /// [`MAX_LOG_LINES`].
    pub fn log(&mut self, line: String) {
        tracing::info!(target: "pagefx_web", "{line}");
        if self.logs.len() == MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    /// Drain accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}

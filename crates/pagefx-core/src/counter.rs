#![forbid(unsafe_code)]

//! Stats counter: visibility trigger plus one tween per display element.
//!
//! [`StatsCounter`] owns the targets it animates. The host hands it every
//! element matching the stat-value selector up front, forwards intersection
//! samples for the stats section, and calls [`StatsCounter::frame`] from its
//! animation loop until it returns `false`.
//!
//! ```text
//! on_visibility(sample, now)   // first qualifying sample only:
//!   → parse each target's text     (endpoint + suffix)
//!   → write "0" + suffix           (no flash of the raw text)
//!   → start one tween per target
//! frame(now)                     // once per display refresh
//!   → write every running tween's text
//!   → false once all are done
//! ```
//!
//! Tweens are independent: each keeps its own clock and endpoint, and the
//! only thing they share is the page they write to.

use std::time::Duration;

use tracing::{debug, info};

use crate::endpoint::parse_endpoint;
use crate::format::NumberLocale;
use crate::tween::{DEFAULT_DURATION, Tween, TweenPhase};
use crate::watcher::{IntersectionSample, VisibilityWatcher};

/// An element whose rendered text is both the data source and the canvas.
pub trait DisplayTarget {
    /// Current text content.
    fn text(&self) -> String;
    /// Replace the text content.
    fn set_text(&mut self, text: &str);
}

impl DisplayTarget for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

#[derive(Debug)]
struct Slot<T> {
    target: T,
    tween: Option<Tween>,
}

/// Visibility-triggered counter animation over a set of targets.
#[derive(Debug)]
pub struct StatsCounter<T: DisplayTarget> {
    watcher: VisibilityWatcher,
    duration: Duration,
    locale: NumberLocale,
    slots: Vec<Slot<T>>,
}

impl<T: DisplayTarget> StatsCounter<T> {
    /// Create a counter over `targets`, triggered by `watcher`.
    #[must_use]
    pub fn new(watcher: VisibilityWatcher, targets: Vec<T>) -> Self {
        Self {
            watcher,
            duration: DEFAULT_DURATION,
            locale: NumberLocale::default(),
            slots: targets
                .into_iter()
                .map(|target| Slot {
                    target,
                    tween: None,
                })
                .collect(),
        }
    }

    /// Override the tween duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Override the grouping locale.
    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// The trigger.
    #[must_use]
    pub fn watcher(&self) -> &VisibilityWatcher {
        &self.watcher
    }

    /// Number of display targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no display targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the targets in document order.
    pub fn targets(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|slot| &slot.target)
    }

    /// Phase of each target's tween (`Idle` before the trigger).
    pub fn phases(&self) -> impl Iterator<Item = TweenPhase> + '_ {
        self.slots
            .iter()
            .map(|slot| slot.tween.as_ref().map_or(TweenPhase::Idle, Tween::phase))
    }

    /// Whether any tween still needs frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phases().any(|phase| phase == TweenPhase::Running)
    }

    /// Feed an intersection sample for the stats section.
    ///
    /// Returns `true` when this sample started the counters. The host should
    /// stop observing the section and start its frame loop.
    pub fn on_visibility(&mut self, sample: IntersectionSample, now: Duration) -> bool {
        if !self.watcher.observe(sample) {
            return false;
        }
        self.start(now);
        true
    }

    /// Write one frame to every running target.
    ///
    /// Returns `true` while at least one tween still needs another frame.
    pub fn frame(&mut self, now: Duration) -> bool {
        let mut running = false;
        for slot in &mut self.slots {
            let Some(tween) = slot.tween.as_mut() else {
                continue;
            };
            if tween.phase() != TweenPhase::Running {
                continue;
            }
            let frame = tween.sample(now);
            slot.target.set_text(&frame.text);
            running |= !frame.done;
        }
        running
    }

    /// Stop every in-flight tween. Targets keep their last written text.
    pub fn cancel(&mut self) {
        let mut cancelled = 0usize;
        for tween in self.slots.iter_mut().filter_map(|slot| slot.tween.as_mut()) {
            if tween.phase() == TweenPhase::Running {
                tween.cancel();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            debug!(cancelled, "stats counter cancelled");
        }
    }

    fn start(&mut self, now: Duration) {
        for slot in &mut self.slots {
            let endpoint = parse_endpoint(&slot.target.text());
            let mut tween = Tween::new(0.0, endpoint.value, self.duration, endpoint.suffix)
                .with_locale(self.locale.clone());
            let reset = tween.begin(now);
            slot.target.set_text(&reset);
            slot.tween = Some(tween);
        }
        info!(
            targets = self.slots.len(),
            duration_ms = self.duration.as_millis() as u64,
            "stats counter started"
        );
    }
}

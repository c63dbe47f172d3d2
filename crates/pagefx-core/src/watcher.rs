#![forbid(unsafe_code)]

//! One-shot visibility trigger for the stats section.
//!
//! The host forwards every intersection notification for the observed
//! container as an [`IntersectionSample`]. [`VisibilityWatcher::observe`]
//! answers `true` exactly once, for the first sample that is intersecting at
//! or above the threshold. After that the watcher is [`WatcherState::Fired`]
//! and ignores everything, so scrolling the section out and back in never
//! restarts the counters. There is no way to re-arm it.

use tracing::debug;

/// Default fraction of the container that must be visible.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Plain-data copy of an intersection notification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntersectionSample {
    /// Whether the target overlaps the viewport at all.
    pub is_intersecting: bool,
    /// Visible fraction of the target in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionSample {
    /// Sample for a target that is visible by `ratio`.
    #[must_use]
    pub fn visible(ratio: f64) -> Self {
        Self {
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    /// Sample for a target outside the viewport.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Watcher lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Waiting for the first qualifying sample.
    Armed,
    /// Fired once; observation has stopped.
    Fired,
    /// No container exists on this page; never fires.
    Detached,
}

/// One-shot intersection trigger.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    threshold: f64,
    state: WatcherState,
}

impl Default for VisibilityWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl VisibilityWatcher {
    /// Armed watcher. `threshold` is clamped into `[0, 1]`; NaN becomes the
    /// default threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            state: WatcherState::Armed,
        }
    }

    /// Watcher for a page without the observed container.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            state: WatcherState::Detached,
        }
    }

    /// Visibility threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Whether the host should still deliver samples.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state == WatcherState::Armed
    }

    /// Feed one notification. Returns `true` only on the firing sample.
    pub fn observe(&mut self, sample: IntersectionSample) -> bool {
        if self.state != WatcherState::Armed {
            return false;
        }
        if !sample.is_intersecting || sample.ratio < self.threshold {
            return false;
        }
        self.state = WatcherState::Fired;
        debug!(ratio = sample.ratio, threshold = self.threshold, "visibility watcher fired");
        true
    }
}

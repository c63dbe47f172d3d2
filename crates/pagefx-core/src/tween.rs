#![forbid(unsafe_code)]

//! Ease-out numeric tween polled once per display refresh.
//!
//! A [`Tween`] never schedules itself. The host render loop calls
//! [`Tween::sample`] with the frame timestamp and writes the returned text;
//! once a frame reports `done`, the host stops asking.
//!
//! # Phases
//! ```text
//! Idle ──begin──▶ Running ──elapsed ≥ duration──▶ Complete
//!                    │
//!                    └──cancel──▶ Cancelled
//! ```
//! `Complete` and `Cancelled` are terminal. Sampling a terminal tween returns
//! the last frame again without touching any state.
//!
//! # Invariants
//! 1. Progress is clamped to `[0, 1]`; a zero duration completes on the first
//!    sample.
//! 2. Displayed values are non-decreasing across samples with non-decreasing
//!    timestamps (for `end >= start`).
//! 3. The completing frame shows exactly `floor(end)`.

use std::time::Duration;

use tracing::trace;

use crate::format::NumberLocale;

/// Fixed counter duration used by the stats section.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Quadratic ease-out: fast start, decelerating into the endpoint.
#[inline]
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Lifecycle of a single tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenPhase {
    /// Created, not yet started.
    #[default]
    Idle,
    /// Started and producing frames.
    Running,
    /// Reached the endpoint.
    Complete,
    /// Stopped early through [`Tween::cancel`].
    Cancelled,
}

impl TweenPhase {
    /// Whether no further frames will be produced.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled)
    }
}

/// One sampled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenFrame {
    /// Floored display value.
    pub value: f64,
    /// Formatted value followed by the suffix.
    pub text: String,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Whether this is the final frame.
    pub done: bool,
}

/// An in-flight numeric animation from `start` to `end`.
#[derive(Debug, Clone)]
pub struct Tween {
    start: f64,
    end: f64,
    duration: Duration,
    suffix: String,
    locale: NumberLocale,
    started_at: Option<Duration>,
    phase: TweenPhase,
    last: Option<TweenFrame>,
}

impl Tween {
    /// Create an idle tween.
    #[must_use]
    pub fn new(start: f64, end: f64, duration: Duration, suffix: impl Into<String>) -> Self {
        Self {
            start,
            end,
            duration,
            suffix: suffix.into(),
            locale: NumberLocale::default(),
            started_at: None,
            phase: TweenPhase::Idle,
            last: None,
        }
    }

    /// Use a different grouping locale for frame text.
    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TweenPhase {
        self.phase
    }

    /// Literal suffix appended to every frame.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Start the clock at `now` and return the reset text (start value plus
    /// suffix) to show before the first frame fires.
    ///
    /// Calling this on a tween that already started returns the text of the
    /// last frame and leaves the clock alone.
    pub fn begin(&mut self, now: Duration) -> String {
        if self.phase != TweenPhase::Idle {
            return self
                .last
                .as_ref()
                .map_or_else(|| self.render(self.start), |frame| frame.text.clone());
        }
        self.started_at = Some(now);
        self.phase = TweenPhase::Running;
        let frame = self.frame_at(0.0);
        let text = frame.text.clone();
        self.last = Some(frame);
        text
    }

    /// Produce the frame for timestamp `now`.
    ///
    /// An idle tween reports its start frame without starting.
    pub fn sample(&mut self, now: Duration) -> TweenFrame {
        match self.phase {
            TweenPhase::Idle => self.frame_at(0.0),
            TweenPhase::Complete | TweenPhase::Cancelled => self
                .last
                .clone()
                .unwrap_or_else(|| self.frame_at(0.0)),
            TweenPhase::Running => {
                let started_at = self.started_at.unwrap_or(now);
                let progress = self.progress(now.saturating_sub(started_at));
                let frame = self.frame_at(progress);
                if frame.done {
                    self.phase = TweenPhase::Complete;
                    trace!(end = self.end, "tween complete");
                }
                self.last = Some(frame.clone());
                frame
            }
        }
    }

    /// Stop producing frames. Has no effect on a terminal tween.
    pub fn cancel(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = TweenPhase::Cancelled;
        }
    }

    /// Display value at linear `progress`.
    #[must_use]
    pub fn value_at(&self, progress: f64) -> f64 {
        let eased = ease_out_quad(progress.clamp(0.0, 1.0));
        (eased * (self.end - self.start) + self.start).floor()
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn frame_at(&self, progress: f64) -> TweenFrame {
        let value = self.value_at(progress);
        TweenFrame {
            value,
            text: self.render(value),
            progress,
            done: progress >= 1.0,
        }
    }

    fn render(&self, value: f64) -> String {
        let mut text = self.locale.format_grouped(value);
        text.push_str(&self.suffix);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(1.0), 1.0);
    }

    #[test]
    fn begin_writes_reset_text() {
        let mut tween = Tween::new(0.0, 12_500.0, DEFAULT_DURATION, "+");
        assert_eq!(tween.phase(), TweenPhase::Idle);
        assert_eq!(tween.begin(ms(100)), "0+");
        assert_eq!(tween.phase(), TweenPhase::Running);
    }

    #[test]
    fn midpoint_frame_is_eased() {
        let mut tween = Tween::new(0.0, 1_000.0, DEFAULT_DURATION, "");
        tween.begin(ms(0));
        let frame = tween.sample(ms(1000));
        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.value, 750.0);
        assert_eq!(frame.text, "750");
        assert!(!frame.done);
    }

    #[test]
    fn completes_at_duration_with_exact_endpoint() {
        let mut tween = Tween::new(0.0, 12_500.0, DEFAULT_DURATION, "+");
        tween.begin(ms(0));
        let frame = tween.sample(ms(2000));
        assert!(frame.done);
        assert_eq!(frame.text, "12,500+");
        assert_eq!(tween.phase(), TweenPhase::Complete);
    }

    #[test]
    fn late_frames_clamp_to_endpoint() {
        let mut tween = Tween::new(0.0, 3_500_000.0, DEFAULT_DURATION, "M");
        tween.begin(ms(0));
        let frame = tween.sample(ms(9000));
        assert_eq!(frame.progress, 1.0);
        assert_eq!(frame.text, "3,500,000M");
    }

    #[test]
    fn timestamp_before_start_clamps_to_zero() {
        let mut tween = Tween::new(0.0, 100.0, DEFAULT_DURATION, "%");
        tween.begin(ms(500));
        let frame = tween.sample(ms(400));
        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.text, "0%");
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tween = Tween::new(0.0, 42.0, Duration::ZERO, "");
        tween.begin(ms(10));
        let frame = tween.sample(ms(10));
        assert!(frame.done);
        assert_eq!(frame.value, 42.0);
    }

    #[test]
    fn cancel_freezes_last_frame() {
        let mut tween = Tween::new(0.0, 1_000.0, DEFAULT_DURATION, "");
        tween.begin(ms(0));
        let mid = tween.sample(ms(1000));
        tween.cancel();
        assert_eq!(tween.phase(), TweenPhase::Cancelled);
        assert_eq!(tween.sample(ms(2000)), mid);
    }

    #[test]
    fn cancel_after_complete_is_ignored() {
        let mut tween = Tween::new(0.0, 10.0, DEFAULT_DURATION, "");
        tween.begin(ms(0));
        tween.sample(ms(2000));
        tween.cancel();
        assert_eq!(tween.phase(), TweenPhase::Complete);
    }

    #[test]
    fn second_begin_keeps_clock() {
        let mut tween = Tween::new(0.0, 1_000.0, DEFAULT_DURATION, "");
        tween.begin(ms(0));
        tween.sample(ms(1000));
        assert_eq!(tween.begin(ms(1000)), "750");
        assert_eq!(tween.sample(ms(2000)).text, "1,000");
    }

    #[test]
    fn idle_sample_does_not_start() {
        let mut tween = Tween::new(0.0, 10.0, DEFAULT_DURATION, "x");
        let frame = tween.sample(ms(5000));
        assert_eq!(frame.text, "0x");
        assert_eq!(tween.phase(), TweenPhase::Idle);
    }

    #[test]
    fn locale_changes_grouping() {
        let mut tween =
            Tween::new(0.0, 12_500.0, Duration::ZERO, "+").with_locale(NumberLocale::from_tag("de"));
        tween.begin(ms(0));
        assert_eq!(tween.sample(ms(0)).text, "12.500+");
    }
}

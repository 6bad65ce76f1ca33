//! The visible time window of the timeline grid.
//!
//! A window is a bounded slice of one day (`start`..`end`, minutes since
//! midnight) cut into rows of `step` minutes.

use serde::{Deserialize, Serialize};
use std::iter::StepBy;
use std::ops::Range;

use crate::error::ValidationError;

/// Minutes since midnight.
pub type Minutes = i32;

/// Length of a day; the largest value a window end may take.
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Default row granularity.
pub const DEFAULT_STEP: Minutes = 30;

/// Default visible range, 10:00 to 18:00.
pub const DEFAULT_START: Minutes = 10 * 60;
pub const DEFAULT_END: Minutes = 18 * 60;

/// Row boundaries of a window, produced by [`TimeWindow::rows`].
pub type Rows = StepBy<Range<Minutes>>;

/// Visible start/end bound of the day plus row granularity.
///
/// Invariant: `0 <= start < end <= MINUTES_PER_DAY` and `end - start >= step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimeWindow {
    start: Minutes,
    end: Minutes,
    step: Minutes,
}

impl TimeWindow {
    /// Create a window, rejecting bounds that break the invariant.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidWindow`] if `step <= 0`, either bound
    /// is outside the day, or the range is shorter than one step.
    pub fn new(start: Minutes, end: Minutes, step: Minutes) -> Result<Self, ValidationError> {
        let valid = step > 0
            && start >= 0
            && end <= MINUTES_PER_DAY
            && end - start >= step;
        if !valid {
            return Err(ValidationError::InvalidWindow { start, end, step });
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn step(&self) -> Minutes {
        self.step
    }

    /// Move the start bound. Values past `end - step` are clamped down to it,
    /// negative values up to midnight. Never fails.
    pub fn set_start(&mut self, v: Minutes) {
        self.start = v.min(self.end - self.step).max(0);
    }

    /// Move the end bound. Values before `start + step` are clamped up to it,
    /// values past midnight down to `MINUTES_PER_DAY`. Never fails.
    pub fn set_end(&mut self, v: Minutes) {
        self.end = v.max(self.start + self.step).min(MINUTES_PER_DAY);
    }

    /// Row boundaries `start, start + step, ...` strictly below `end`.
    ///
    /// The iterator borrows nothing, so calling `rows()` again restarts it.
    pub fn rows(&self) -> Rows {
        (self.start..self.end).step_by(self.step as usize)
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Whether `minutes` falls inside `[start, end)`.
    pub fn contains(&self, minutes: Minutes) -> bool {
        (self.start..self.end).contains(&minutes)
    }
}

#[derive(Deserialize)]
struct WindowBounds {
    start: Minutes,
    end: Minutes,
    step: Minutes,
}

impl TryFrom<WindowBounds> for TimeWindow {
    type Error = ValidationError;

    fn try_from(b: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(b.start, b.end, b.step)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            step: DEFAULT_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_ten_to_six() {
        let w = TimeWindow::default();
        assert_eq!((w.start(), w.end(), w.step()), (600, 1080, 30));
    }

    #[test]
    fn rows_cover_default_window() {
        let w = TimeWindow::default();
        let rows: Vec<_> = w.rows().collect();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows.first(), Some(&600));
        assert_eq!(rows.last(), Some(&1050));
        assert!(rows.windows(2).all(|p| p[1] - p[0] == 30));
    }

    #[test]
    fn rows_restart_and_handle_unaligned_end() {
        let w = TimeWindow::new(600, 700, 30).unwrap();
        assert_eq!(w.rows().collect::<Vec<_>>(), vec![600, 630, 660, 690]);
        assert_eq!(w.rows().count(), w.row_count());
    }

    #[test]
    fn set_start_accepts_valid_value() {
        let mut w = TimeWindow::default();
        w.set_start(700);
        assert_eq!(w.start(), 700);
    }

    #[test]
    fn set_start_clamps_to_one_step_before_end() {
        let mut w = TimeWindow::default();
        w.set_start(1070);
        assert_eq!(w.start(), 1050);
        w.set_start(5000);
        assert_eq!(w.start(), 1050);
    }

    #[test]
    fn set_end_clamps_to_one_step_after_start() {
        let mut w = TimeWindow::default();
        w.set_end(610);
        assert_eq!(w.end(), 630);
        w.set_end(2000);
        assert_eq!(w.end(), MINUTES_PER_DAY);
    }

    #[test]
    fn negative_start_clamps_to_midnight() {
        let mut w = TimeWindow::default();
        w.set_start(-90);
        assert_eq!(w.start(), 0);
    }

    #[test]
    fn new_rejects_broken_bounds() {
        assert!(TimeWindow::new(600, 600, 30).is_err());
        assert!(TimeWindow::new(600, 620, 30).is_err());
        assert!(TimeWindow::new(-1, 600, 30).is_err());
        assert!(TimeWindow::new(0, 1441, 30).is_err());
        assert!(TimeWindow::new(0, 600, 0).is_err());
        assert!(TimeWindow::new(0, MINUTES_PER_DAY, 30).is_ok());
    }

    #[test]
    fn deserialize_validates_bounds() {
        let w: TimeWindow = serde_json::from_str(r#"{"start":480,"end":600,"step":15}"#).unwrap();
        assert_eq!(w.row_count(), 8);
        assert!(serde_json::from_str::<TimeWindow>(r#"{"start":600,"end":600,"step":0}"#).is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let w = TimeWindow::default();
        assert!(w.contains(600));
        assert!(w.contains(1079));
        assert!(!w.contains(1080));
        assert!(!w.contains(599));
    }
}

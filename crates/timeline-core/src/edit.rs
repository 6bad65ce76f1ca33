//! Validation of user edits before they reach the store or the window.
//!
//! Raw input arrives as text (`HH:MM`) or as picker values. Everything that
//! changes an event's time range or the window bounds goes through
//! [`EditController`], which parses and clamps it first.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::timeline::{normalized_end, Event, Minutes, TimeWindow, MINUTES_PER_DAY};

/// Parse `HH:MM` into minutes since midnight.
///
/// Hours 0-23 and minutes 0-59 are accepted, plus `24:00` for the end of the
/// day. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns a [`ParseError`] describing the first malformed component.
pub fn parse_time(text: &str) -> Result<Minutes, ParseError> {
    let input = text.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let (h, m) = input.split_once(':').ok_or_else(|| ParseError::MissingColon {
        input: input.to_string(),
    })?;

    let hour = parse_component(h).ok_or_else(|| ParseError::InvalidHour {
        input: input.to_string(),
    })?;
    let minute = parse_component(m).ok_or_else(|| ParseError::InvalidMinute {
        input: input.to_string(),
    })?;

    let in_range = (hour < 24 && minute < 60) || (hour == 24 && minute == 0);
    if !in_range {
        return Err(ParseError::OutOfRange {
            input: input.to_string(),
        });
    }
    Ok(hour * 60 + minute)
}

// One or two ASCII digits. `str::parse` alone would take "+5".
fn parse_component(s: &str) -> Option<Minutes> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Zero-padded 24-hour `HH:MM`.
pub fn format_time(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Picker values from `min` to `max` inclusive, `step` apart.
pub fn time_options(min: Minutes, max: Minutes, step: Minutes) -> Vec<Minutes> {
    if step <= 0 || min > max {
        return Vec::new();
    }
    (min..=max).step_by(step as usize).collect()
}

/// Structured replacement for the title/start/end prompts.
///
/// A blank `start_text` or `end_text` keeps the event's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub title: String,
    pub start_text: String,
    pub end_text: String,
}

impl EditRequest {
    pub fn new(
        title: impl Into<String>,
        start_text: impl Into<String>,
        end_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_text: start_text.into(),
            end_text: end_text.into(),
        }
    }
}

/// Single validated entry point for time-range mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditController;

impl EditController {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_time(&self, text: &str) -> Result<Minutes, ParseError> {
        parse_time(text)
    }

    /// Produce the edited event without touching the store.
    ///
    /// Both times are parsed before anything changes; the end is then raised
    /// to `start + 30` when shorter.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if either time is malformed.
    pub fn apply_event_edit(&self, event: &Event, request: &EditRequest) -> Result<Event, ParseError> {
        let start = parse_or_keep(&request.start_text, event.start)?;
        let end = parse_or_keep(&request.end_text, event.end)?;
        Ok(Event {
            title: request.title.clone(),
            start,
            end: normalized_end(start, end),
            ..event.clone()
        })
    }

    /// Move the window start; see [`TimeWindow::set_start`] for clamping.
    pub fn set_window_start(&self, window: &mut TimeWindow, v: Minutes) {
        window.set_start(v);
    }

    /// Move the window end; see [`TimeWindow::set_end`] for clamping.
    pub fn set_window_end(&self, window: &mut TimeWindow, v: Minutes) {
        window.set_end(v);
    }

    /// Text variant of [`set_window_start`](Self::set_window_start).
    ///
    /// # Errors
    /// Returns a [`ParseError`] and leaves the window as is on bad input.
    pub fn set_window_start_text(&self, window: &mut TimeWindow, text: &str) -> Result<(), ParseError> {
        self.set_window_start(window, parse_time(text)?);
        Ok(())
    }

    /// Text variant of [`set_window_end`](Self::set_window_end).
    ///
    /// # Errors
    /// Returns a [`ParseError`] and leaves the window as is on bad input.
    pub fn set_window_end_text(&self, window: &mut TimeWindow, text: &str) -> Result<(), ParseError> {
        self.set_window_end(window, parse_time(text)?);
        Ok(())
    }

    /// Values offered by the window start/end pickers.
    pub fn window_options(&self, window: &TimeWindow) -> Vec<Minutes> {
        time_options(0, MINUTES_PER_DAY, window.step())
    }
}

fn parse_or_keep(text: &str, current: Minutes) -> Result<Minutes, ParseError> {
    if text.trim().is_empty() {
        Ok(current)
    } else {
        parse_time(text)
    }
}

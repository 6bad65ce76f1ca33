//! Event types placed on the timeline.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::window::Minutes;
use crate::edit::format_time;
use crate::error::ValidationError;

/// Shortest allowed event; edits that would go below it are raised to it.
pub const MIN_EVENT_MINUTES: Minutes = 30;

/// Opaque event identifier, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Day of the week an event belongs to: 0 = Monday ... 6 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    pub const MONDAY: Day = Day(0);
    pub const SUNDAY: Day = Day(6);

    /// # Errors
    /// Returns [`ValidationError::InvalidDay`] if `index > 6`.
    pub fn new(index: u8) -> Result<Self, ValidationError> {
        if index > 6 {
            return Err(ValidationError::InvalidDay(index));
        }
        Ok(Self(index))
    }

    /// All seven days, Monday first.
    pub fn all() -> impl Iterator<Item = Day> {
        (0..7).map(Day)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Short label for day chips, e.g. "Mon".
    pub fn label(&self) -> String {
        self.weekday().to_string()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_monday() as u8)
    }
}

impl TryFrom<u8> for Day {
    type Error = ValidationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

/// A titled, day-scoped, time-bounded block.
///
/// Events are owned by [`EventStore`](crate::store::EventStore); callers get
/// shared references or clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub day: Day,
    pub title: String,
    pub start: Minutes,
    pub end: Minutes,
}

impl Event {
    /// Build an event with a fresh id. `end` is raised to
    /// `start + MIN_EVENT_MINUTES` when shorter.
    pub fn new(day: Day, title: impl Into<String>, start: Minutes, end: Minutes) -> Self {
        Self {
            id: EventId::new(),
            day,
            title: title.into(),
            start,
            end: normalized_end(start, end),
        }
    }

    pub fn duration_minutes(&self) -> Minutes {
        self.end - self.start
    }

    /// Check if this event overlaps with another on the same day.
    ///
    /// Informational only; the store keeps overlapping events.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && self.end > other.start
    }

    /// Title to render, falling back to `placeholder` for blank titles.
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.title.trim().is_empty() {
            placeholder
        } else {
            &self.title
        }
    }

    /// "HH:MM – HH:MM"
    pub fn time_label(&self) -> String {
        format!("{} – {}", format_time(self.start), format_time(self.end))
    }
}

/// `max(start + MIN_EVENT_MINUTES, end)`, saturating at `Minutes::MAX`.
///
/// Times are expected in `0..=MINUTES_PER_DAY`; the store does not reject
/// values outside it, they just lay out off the canvas.
pub fn normalized_end(start: Minutes, end: Minutes) -> Minutes {
    end.max(start.saturating_add(MIN_EVENT_MINUTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds() {
        assert!(Day::new(0).is_ok());
        assert!(Day::new(6).is_ok());
        assert_eq!(Day::new(7), Err(ValidationError::InvalidDay(7)));
        assert_eq!(Day::all().count(), 7);
    }

    #[test]
    fn day_maps_monday_first() {
        assert_eq!(Day::MONDAY.weekday(), Weekday::Mon);
        assert_eq!(Day::SUNDAY.label(), "Sun");
        assert_eq!(Day::from(Weekday::Wed).index(), 2);
    }

    #[test]
    fn day_serializes_as_integer() {
        let json = serde_json::to_string(&Day::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
        assert!(serde_json::from_str::<Day>("8").is_err());
    }

    #[test]
    fn new_event_enforces_min_duration() {
        let e = Event::new(Day::MONDAY, "standup", 660, 670);
        assert_eq!(e.end, 690);
        assert_eq!(e.duration_minutes(), MIN_EVENT_MINUTES);

        let long = Event::new(Day::MONDAY, "workshop", 660, 780);
        assert_eq!(long.end, 780);
    }

    #[test]
    fn normalized_end_saturates_near_max() {
        assert_eq!(normalized_end(Minutes::MAX - 10, 0), Minutes::MAX);
        let e = Event::new(Day::MONDAY, "x", Minutes::MAX, Minutes::MAX);
        assert_eq!(e.end, Minutes::MAX);
    }

    #[test]
    fn ids_are_unique() {
        let a = Event::new(Day::MONDAY, "", 600, 630);
        let b = Event::new(Day::MONDAY, "", 600, 630);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn event_id_parses_its_display_form() {
        let id = EventId::new();
        let parsed: EventId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn overlap_requires_same_day() {
        let a = Event::new(Day::MONDAY, "a", 600, 660);
        let b = Event::new(Day::MONDAY, "b", 630, 690);
        let c = Event::new(Day::new(1).unwrap(), "c", 630, 690);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));

        let touching = Event::new(Day::MONDAY, "d", 660, 690);
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn blank_title_uses_placeholder() {
        let e = Event::new(Day::MONDAY, "   ", 600, 630);
        assert_eq!(e.display_title("Untitled"), "Untitled");
        let named = Event::new(Day::MONDAY, "Review", 600, 630);
        assert_eq!(named.display_title("Untitled"), "Review");
    }

    #[test]
    fn time_label_formats_both_bounds() {
        let e = Event::new(Day::MONDAY, "x", 660, 690);
        assert_eq!(e.time_label(), "11:00 – 11:30");
    }
}

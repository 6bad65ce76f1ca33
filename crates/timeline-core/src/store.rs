//! In-memory event store.
//!
//! Events are kept in insertion order and partitioned by day only when read.
//! The store checks each event on its own; overlapping events are allowed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::timeline::{normalized_end, Day, Event, EventId, Minutes, TimeWindow, MIN_EVENT_MINUTES};

/// Partial change to an event. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<Minutes>,
    pub end: Option<Minutes>,
}

impl EventPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn times(start: Minutes, end: Minutes) -> Self {
        Self {
            title: None,
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Owner of every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: IndexMap<EventId, Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new event and return a copy of it.
    ///
    /// `end` is raised to `start + 30` when shorter.
    pub fn add(&mut self, day: Day, title: impl Into<String>, start: Minutes, end: Minutes) -> Event {
        let event = Event::new(day, title, start, end);
        tracing::debug!(id = %event.id, day = day.index(), start = event.start, end = event.end, "event added");
        self.events.insert(event.id, event.clone());
        event
    }

    /// Insert a default block for `day`: 30 minutes, one hour into the window
    /// or the last half hour of it, whichever comes first.
    pub fn add_default(&mut self, day: Day, title: impl Into<String>, window: &TimeWindow) -> Event {
        let (start, end) = default_slot(window);
        self.add(day, title, start, end)
    }

    /// Apply `patch` to the event with `id`.
    ///
    /// The resulting end is `max(start + 30, end)`, so an edit can never make
    /// an event shorter than the minimum.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no event has `id`; the store is left
    /// unchanged.
    pub fn update(&mut self, id: EventId, patch: EventPatch) -> Result<Event> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or(CoreError::NotFound { id })?;

        if let Some(title) = patch.title {
            event.title = title;
        }
        let start = patch.start.unwrap_or(event.start);
        let end = patch.end.unwrap_or(event.end);
        event.start = start;
        event.end = normalized_end(start, end);

        tracing::debug!(%id, start = event.start, end = event.end, "event updated");
        Ok(event.clone())
    }

    /// Replace a stored event wholesale, keeping its position.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if the event's id is not stored.
    pub fn replace(&mut self, event: Event) -> Result<Event> {
        let slot = self
            .events
            .get_mut(&event.id)
            .ok_or(CoreError::NotFound { id: event.id })?;
        *slot = Event {
            end: normalized_end(event.start, event.end),
            ..event
        };
        tracing::debug!(id = %slot.id, "event replaced");
        Ok(slot.clone())
    }

    /// Delete the event with `id` and return it.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no event has `id`.
    pub fn remove(&mut self, id: EventId) -> Result<Event> {
        let removed = self
            .events
            .shift_remove(&id)
            .ok_or(CoreError::NotFound { id })?;
        tracing::debug!(%id, "event removed");
        Ok(removed)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Events on `day`, in insertion order. Reads live state on every call.
    pub fn by_day(&self, day: Day) -> impl Iterator<Item = &Event> + '_ {
        self.events.values().filter(move |e| e.day == day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Default placement for a new event inside `window`.
pub fn default_slot(window: &TimeWindow) -> (Minutes, Minutes) {
    let start = (window.end() - MIN_EVENT_MINUTES)
        .min(window.start() + 60)
        .max(0);
    (start, start + MIN_EVENT_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuesday() -> Day {
        Day::new(1).unwrap()
    }

    #[test]
    fn add_returns_stored_event() {
        let mut store = EventStore::new();
        let e = store.add(Day::MONDAY, "Review", 660, 720);
        assert_eq!(store.get(e.id), Some(&e));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_raises_short_end() {
        let mut store = EventStore::new();
        let e = store.add(Day::MONDAY, "", 660, 600);
        assert_eq!(e.end, 690);
    }

    #[test]
    fn default_slot_one_hour_in() {
        assert_eq!(default_slot(&TimeWindow::default()), (660, 690));
    }

    #[test]
    fn default_slot_in_narrow_window_uses_last_half_hour() {
        let w = TimeWindow::new(600, 640, 30).unwrap();
        assert_eq!(default_slot(&w), (610, 640));
    }

    #[test]
    fn default_slot_never_negative() {
        let w = TimeWindow::new(0, 15, 15).unwrap();
        assert_eq!(default_slot(&w), (0, 30));
    }

    #[test]
    fn update_normalizes_end() {
        let mut store = EventStore::new();
        let e = store.add(Day::MONDAY, "x", 600, 630);
        let updated = store.update(e.id, EventPatch::times(660, 675)).unwrap();
        assert_eq!((updated.start, updated.end), (660, 690));
        assert_eq!(store.get(e.id).unwrap().end, 690);
    }

    #[test]
    fn update_start_only_keeps_min_duration() {
        let mut store = EventStore::new();
        let e = store.add(Day::MONDAY, "x", 600, 630);
        let patch = EventPatch {
            start: Some(700),
            ..EventPatch::default()
        };
        let updated = store.update(e.id, patch).unwrap();
        assert_eq!((updated.start, updated.end), (700, 730));
    }

    #[test]
    fn update_title_only() {
        let mut store = EventStore::new();
        let e = store.add(Day::MONDAY, "old", 600, 660);
        let updated = store.update(e.id, EventPatch::title("new")).unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!((updated.start, updated.end), (600, 660));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = EventStore::new();
        store.add(Day::MONDAY, "x", 600, 630);
        let before: Vec<_> = store.iter().cloned().collect();
        let err = store.update(EventId::new(), EventPatch::title("y")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn remove_unknown_id_leaves_store_unchanged() {
        let mut store = EventStore::new();
        store.add(Day::MONDAY, "x", 600, 630);
        assert!(matches!(
            store.remove(EventId::new()),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut store = EventStore::new();
        let a = store.add(Day::MONDAY, "a", 600, 630);
        let b = store.add(Day::MONDAY, "b", 630, 660);
        let c = store.add(Day::MONDAY, "c", 660, 690);
        store.remove(b.id).unwrap();
        let ids: Vec<_> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn by_day_filters_and_reflects_live_state() {
        let mut store = EventStore::new();
        store.add(Day::MONDAY, "mon", 600, 630);
        store.add(tuesday(), "tue", 600, 630);
        assert_eq!(store.by_day(Day::MONDAY).count(), 1);

        store.add(Day::MONDAY, "mon 2", 700, 730);
        let titles: Vec<_> = store.by_day(Day::MONDAY).map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["mon", "mon 2"]);
        assert_eq!(store.by_day(Day::SUNDAY).count(), 0);
    }

    #[test]
    fn overlapping_events_are_kept() {
        let mut store = EventStore::new();
        store.add(Day::MONDAY, "a", 600, 660);
        store.add(Day::MONDAY, "b", 630, 690);
        assert_eq!(store.by_day(Day::MONDAY).count(), 2);
    }

    #[test]
    fn replace_keeps_position_and_min_duration() {
        let mut store = EventStore::new();
        let a = store.add(Day::MONDAY, "a", 600, 630);
        let b = store.add(Day::MONDAY, "b", 630, 660);
        let edited = Event {
            title: "a2".into(),
            end: 601,
            ..a.clone()
        };
        let stored = store.replace(edited).unwrap();
        assert_eq!(stored.end, 630);
        let ids: Vec<_> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}

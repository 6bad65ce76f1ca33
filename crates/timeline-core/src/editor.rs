//! Owned editor state: window, events and the active day.
//!
//! The presentation layer holds one [`Editor`] and calls into it for every
//! user action. Time edits pass through the [`EditController`] before they
//! reach the window or the store, and each successful mutation records a
//! [`Change`]. The buffer holds at most [`MAX_PENDING_CHANGES`] entries;
//! callers that never drain it lose the oldest ones.

use std::collections::VecDeque;

use crate::changes::Change;
use crate::edit::{EditController, EditRequest};
use crate::error::{CoreError, Result};
use crate::storage::Config;
use crate::store::{EventPatch, EventStore};
use crate::timeline::{Day, DayView, Event, EventId, Minutes, TimeWindow};

/// Title of the sample event seeded on startup.
pub const SAMPLE_EVENT_TITLE: &str = "Enter an event title";

/// Changes kept between drains before the oldest are dropped.
pub const MAX_PENDING_CHANGES: usize = 256;

#[derive(Debug, Clone)]
pub struct Editor {
    window: TimeWindow,
    store: EventStore,
    active_day: Day,
    controller: EditController,
    default_title: String,
    placeholder_title: String,
    changes: VecDeque<Change>,
}

impl Editor {
    /// Empty editor over `window`, Monday selected.
    pub fn with_window(window: TimeWindow) -> Self {
        let defaults = Config::default();
        Self {
            window,
            store: EventStore::new(),
            active_day: Day::MONDAY,
            controller: EditController::new(),
            default_title: defaults.events.default_title,
            placeholder_title: defaults.events.placeholder_title,
            changes: VecDeque::new(),
        }
    }

    /// Build the startup state from configuration, seeding the sample event
    /// when enabled.
    ///
    /// # Errors
    /// Returns an error if the configured window is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut editor = Self::with_window(config.time_window()?);
        editor.default_title = config.events.default_title.clone();
        editor.placeholder_title = config.events.placeholder_title.clone();
        if config.events.seed_sample_event {
            editor.store.add(Day::MONDAY, SAMPLE_EVENT_TITLE, 11 * 60, 11 * 60 + 30);
        }
        tracing::debug!(
            start = editor.window.start(),
            end = editor.window.end(),
            events = editor.store.len(),
            "editor initialized"
        );
        Ok(editor)
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn controller(&self) -> &EditController {
        &self.controller
    }

    pub fn active_day(&self) -> Day {
        self.active_day
    }

    pub fn placeholder_title(&self) -> &str {
        &self.placeholder_title
    }

    /// Move the window start, clamped below the end. Returns the new window.
    pub fn set_window_start(&mut self, v: Minutes) -> TimeWindow {
        self.controller.set_window_start(&mut self.window, v);
        self.window_changed()
    }

    /// Move the window end, clamped above the start. Returns the new window.
    pub fn set_window_end(&mut self, v: Minutes) -> TimeWindow {
        self.controller.set_window_end(&mut self.window, v);
        self.window_changed()
    }

    /// # Errors
    /// Returns a parse error and leaves the window unchanged on bad input.
    pub fn set_window_start_text(&mut self, text: &str) -> Result<TimeWindow> {
        self.controller.set_window_start_text(&mut self.window, text)?;
        Ok(self.window_changed())
    }

    /// # Errors
    /// Returns a parse error and leaves the window unchanged on bad input.
    pub fn set_window_end_text(&mut self, text: &str) -> Result<TimeWindow> {
        self.controller.set_window_end_text(&mut self.window, text)?;
        Ok(self.window_changed())
    }

    fn window_changed(&mut self) -> TimeWindow {
        tracing::debug!(start = self.window.start(), end = self.window.end(), "window changed");
        self.record(Change::WindowChanged {
            window: self.window,
        });
        self.window
    }

    pub fn select_day(&mut self, day: Day) {
        self.active_day = day;
        self.record(Change::DaySelected { day });
    }

    /// The "add" action: a default 30-minute block on the active day.
    pub fn add_event(&mut self) -> Event {
        let event = self
            .store
            .add_default(self.active_day, self.default_title.clone(), &self.window);
        self.record(Change::EventAdded {
            event: event.clone(),
        });
        event
    }

    /// Add an event with explicit placement.
    pub fn add_event_at(
        &mut self,
        day: Day,
        title: impl Into<String>,
        start: Minutes,
        end: Minutes,
    ) -> Event {
        let event = self.store.add(day, title, start, end);
        self.record(Change::EventAdded {
            event: event.clone(),
        });
        event
    }

    /// Apply a text edit. Nothing changes if either time fails to parse.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, or a parse error.
    pub fn edit_event(&mut self, id: EventId, request: &EditRequest) -> Result<Event> {
        let before = self.find(id)?.clone();
        let edited = self.controller.apply_event_edit(&before, request)?;
        let after = self.store.replace(edited)?;
        self.record(Change::EventUpdated {
            before,
            after: after.clone(),
        });
        Ok(after)
    }

    /// Apply a structured change, e.g. from time pickers.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id.
    pub fn update_event(&mut self, id: EventId, patch: EventPatch) -> Result<Event> {
        let before = self.find(id)?.clone();
        let after = self.store.update(id, patch)?;
        self.record(Change::EventUpdated {
            before,
            after: after.clone(),
        });
        Ok(after)
    }

    /// # Errors
    /// Returns `NotFound` for an unknown id; nothing is removed.
    pub fn delete_event(&mut self, id: EventId) -> Result<Event> {
        let event = self.store.remove(id)?;
        self.record(Change::EventRemoved {
            event: event.clone(),
        });
        Ok(event)
    }

    fn find(&self, id: EventId) -> Result<&Event> {
        self.store
            .get(id)
            .ok_or(CoreError::NotFound { id })
    }

    /// Events on the active day, in store order.
    pub fn day_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.store.by_day(self.active_day)
    }

    /// Layout snapshot of the active day.
    pub fn day_view(&self) -> DayView {
        DayView::build(
            &self.window,
            self.active_day,
            self.day_events(),
            &self.placeholder_title,
        )
    }

    fn record(&mut self, change: Change) {
        if self.changes.len() == MAX_PENDING_CHANGES {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// Take every change recorded since the last call, oldest first.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        self.changes.drain(..).collect()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_window(TimeWindow::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_seeds_sample() {
        let editor = Editor::from_config(&Config::default()).unwrap();
        let events: Vec<_> = editor.day_events().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, SAMPLE_EVENT_TITLE);
        assert_eq!((events[0].start, events[0].end), (660, 690));
    }

    #[test]
    fn seeding_can_be_disabled() {
        let mut cfg = Config::default();
        cfg.events.seed_sample_event = false;
        let editor = Editor::from_config(&cfg).unwrap();
        assert!(editor.store().is_empty());
    }

    #[test]
    fn add_event_uses_active_day_and_default_title() {
        let mut editor = Editor::default();
        let friday = Day::new(4).unwrap();
        editor.select_day(friday);
        let e = editor.add_event();
        assert_eq!(e.day, friday);
        assert_eq!(e.title, "New event");
        assert_eq!((e.start, e.end), (660, 690));
        assert_eq!(editor.day_events().count(), 1);
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut editor = Editor::default();
        let e = editor.add_event();
        editor.drain_changes();

        let err = editor
            .edit_event(e.id, &EditRequest::new("x", "xx:00", "12:00"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
        assert_eq!(editor.store().get(e.id), Some(&e));
        assert!(editor.drain_changes().is_empty());
    }

    #[test]
    fn edit_records_before_and_after() {
        let mut editor = Editor::default();
        let e = editor.add_event();
        editor.drain_changes();

        let after = editor
            .edit_event(e.id, &EditRequest::new("Lunch", "12:00", "13:00"))
            .unwrap();
        assert_eq!((after.start, after.end), (720, 780));

        let changes = editor.drain_changes();
        assert_eq!(
            changes,
            vec![Change::EventUpdated {
                before: e,
                after
            }]
        );
    }

    #[test]
    fn delete_unknown_is_not_found_without_change() {
        let mut editor = Editor::default();
        editor.add_event();
        editor.drain_changes();
        assert!(matches!(
            editor.delete_event(EventId::new()),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(editor.store().len(), 1);
        assert!(editor.drain_changes().is_empty());
    }

    #[test]
    fn window_edits_are_clamped_and_recorded() {
        let mut editor = Editor::default();
        let w = editor.set_window_start(1070);
        assert_eq!(w.start(), 1050);
        let w = editor.set_window_end(0);
        assert_eq!(w.end(), 1080);
        assert_eq!(editor.drain_changes().len(), 2);
    }

    #[test]
    fn undrained_changes_keep_only_the_newest() {
        let mut editor = Editor::default();
        for _ in 0..MAX_PENDING_CHANGES + 10 {
            editor.select_day(Day::MONDAY);
        }
        editor.select_day(Day::SUNDAY);

        let changes = editor.drain_changes();
        assert_eq!(changes.len(), MAX_PENDING_CHANGES);
        assert_eq!(changes.last(), Some(&Change::DaySelected { day: Day::SUNDAY }));
        assert!(editor.drain_changes().is_empty());
    }

    #[test]
    fn day_view_uses_placeholder_for_blank_titles() {
        let mut editor = Editor::default();
        editor.add_event_at(Day::MONDAY, "", 600, 630);
        let view = editor.day_view();
        assert_eq!(view.blocks[0].title, "Untitled");
        assert_eq!(view.day_label, "Mon");
        assert_eq!(view.ticks.len(), 16);
    }
}

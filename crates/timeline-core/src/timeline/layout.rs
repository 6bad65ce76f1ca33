//! Pixel geometry for the timeline grid.
//!
//! Blocks and axis ticks share [`ROW_HEIGHT`] so they line up exactly. Nothing
//! here clamps against the window: an event outside it gets a negative offset
//! or one past the canvas, and the renderer decides whether to clip.

use serde::{Deserialize, Serialize};

use super::item::{Day, Event, EventId};
use super::window::{Minutes, TimeWindow};
use crate::edit::format_time;

/// Height of one row in layout units.
pub const ROW_HEIGHT: f32 = 44.0;

/// Vertical placement of an event block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockLayout {
    pub offset: f32,
    pub height: f32,
}

/// Map an event into the active window.
///
/// Height is never less than one row, so short events stay visible.
pub fn layout(event: &Event, window: &TimeWindow) -> BlockLayout {
    let step = window.step() as f32;
    let offset = (event.start - window.start()) as f32 / step * ROW_HEIGHT;
    let height = (event.duration_minutes() as f32 / step * ROW_HEIGHT).max(ROW_HEIGHT);
    BlockLayout { offset, height }
}

/// Total height of the grid for a window.
pub fn canvas_height(window: &TimeWindow) -> f32 {
    window.row_count() as f32 * ROW_HEIGHT
}

/// One label on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTick {
    pub minutes: Minutes,
    pub label: String,
    /// Full hour; drawn emphasized.
    pub major: bool,
}

/// Axis labels, one per row.
pub fn axis_ticks(window: &TimeWindow) -> impl Iterator<Item = AxisTick> {
    window.rows().map(|minutes| AxisTick {
        minutes,
        label: format_time(minutes),
        major: minutes % 60 == 0,
    })
}

/// An event together with its computed geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBlock {
    pub id: EventId,
    pub title: String,
    pub time_label: String,
    pub start: Minutes,
    pub end: Minutes,
    #[serde(flatten)]
    pub layout: BlockLayout,
}

impl EventBlock {
    pub fn new(event: &Event, window: &TimeWindow, placeholder: &str) -> Self {
        Self {
            id: event.id,
            title: event.display_title(placeholder).to_string(),
            time_label: event.time_label(),
            start: event.start,
            end: event.end,
            layout: layout(event, window),
        }
    }

    /// Whether any part of the block lands on the visible canvas.
    pub fn is_visible(&self, canvas_height: f32) -> bool {
        self.layout.offset < canvas_height && self.layout.offset + self.layout.height > 0.0
    }
}

/// Snapshot of everything needed to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    pub window: TimeWindow,
    pub day: Day,
    pub day_label: String,
    pub canvas_height: f32,
    pub ticks: Vec<AxisTick>,
    pub blocks: Vec<EventBlock>,
}

impl DayView {
    pub fn build<'a>(
        window: &TimeWindow,
        day: Day,
        events: impl IntoIterator<Item = &'a Event>,
        placeholder: &str,
    ) -> Self {
        Self {
            window: *window,
            day,
            day_label: day.label(),
            canvas_height: canvas_height(window),
            ticks: axis_ticks(window).collect(),
            blocks: events
                .into_iter()
                .map(|e| EventBlock::new(e, window, placeholder))
                .collect(),
        }
    }
}

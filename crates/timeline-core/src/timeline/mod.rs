//! Timeline grid and the events placed on it.
//!
//! This module provides:
//! - The visible time window and its rows
//! - Event, day and id types
//! - Layout of events into pixel geometry

mod item;
mod layout;
mod window;

pub use item::{normalized_end, Day, Event, EventId, MIN_EVENT_MINUTES};
pub use layout::{
    axis_ticks, canvas_height, layout, AxisTick, BlockLayout, DayView, EventBlock, ROW_HEIGHT,
};
pub use window::{
    Minutes, Rows, TimeWindow, DEFAULT_END, DEFAULT_START, DEFAULT_STEP, MINUTES_PER_DAY,
};

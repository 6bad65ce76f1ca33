//! # Timeline Editor Core Library
//!
//! This library provides the data model behind a single-day/weekly timeline
//! editor. A presentation layer (the bundled CLI, or any GUI) owns an
//! [`Editor`] and forwards user actions to it; everything it needs to draw
//! comes back as plain values.
//!
//! ## Architecture
//!
//! - **Time Window**: the visible slice of the day and its row granularity
//! - **Event Store**: insertion-ordered events, read per day
//! - **Layout**: pure mapping of an event into pixel offset and height
//! - **Edit Controller**: parses `HH:MM` text and clamps edits so events never
//!   drop below the minimum duration and the window never inverts
//!
//! ## Key Components
//!
//! - [`Editor`]: owned state container and mutation entry point
//! - [`TimeWindow`]: window bounds and rows
//! - [`EventStore`]: event ownership
//! - [`EditController`]: validated edits
//! - [`Config`]: startup configuration

pub mod changes;
pub mod edit;
pub mod editor;
pub mod error;
pub mod storage;
pub mod store;
pub mod timeline;

pub use changes::Change;
pub use edit::{format_time, parse_time, time_options, EditController, EditRequest};
pub use editor::{Editor, MAX_PENDING_CHANGES};
pub use error::{ConfigError, CoreError, ParseError, ValidationError};
pub use storage::Config;
pub use store::{EventPatch, EventStore};
pub use timeline::{
    layout, BlockLayout, Day, DayView, Event, EventBlock, EventId, Minutes, TimeWindow,
    MIN_EVENT_MINUTES, ROW_HEIGHT,
};

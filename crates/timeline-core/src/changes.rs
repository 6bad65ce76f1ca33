//! Change feed recorded by the editor for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::timeline::{Day, Event, EventId, TimeWindow};

/// Every state change in the editor produces a Change.
/// The presentation layer drains them to know what to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Change {
    EventAdded {
        event: Event,
    },
    EventUpdated {
        before: Event,
        after: Event,
    },
    EventRemoved {
        event: Event,
    },
    /// Window bounds after clamping.
    WindowChanged {
        window: TimeWindow,
    },
    DaySelected {
        day: Day,
    },
}

impl Change {
    /// Id of the event this change touches, if any.
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::EventAdded { event } | Self::EventRemoved { event } => Some(event.id),
            Self::EventUpdated { after, .. } => Some(after.id),
            Self::WindowChanged { .. } | Self::DaySelected { .. } => None,
        }
    }
}

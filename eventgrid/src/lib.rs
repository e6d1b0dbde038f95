//! Month grid construction and same-day conflict detection for a read-only
//! list of calendar events.

mod error;

pub mod conflict;
pub mod event;
pub mod month;
pub mod view;

#[cfg(feature = "ics")]
pub mod ics;

pub use conflict::{annotate, overlaps, parse_time, EventWithConflict};
pub use error::{Error, Result};
pub use event::{parse_events, Event};
pub use month::{Cell, Direction, DisplayedMonth};
pub use view::{DayCell, DayDetail, MonthView};

use serde::{Deserialize, Serialize};

use crate::Result;

/// A read-only calendar entry as it appears in the JSON event source.
///
/// All fields are kept verbatim; `date` is `"YYYY-MM-DD"` and the times are
/// `"HH:MM"`, but nothing is validated at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub title: String,
    pub date: String,
}

impl Event {
    #[must_use]
    pub fn is_on(&self, date_key: &str) -> bool {
        self.date == date_key
    }

    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Decodes the event source, a JSON array of events.
pub fn parse_events<S: AsRef<str>>(s: S) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(s.as_ref())?)
}

/// Events whose date equals `date_key`, in source order.
pub fn events_on<'a>(events: &'a [Event], date_key: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.is_on(date_key)).collect()
}

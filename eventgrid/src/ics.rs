use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime, Utc};
use ics::{
    components::Property,
    escape_text,
    properties::{DtEnd, DtStart, Summary},
    ICalendar,
};
use log::warn;

use crate::{DisplayedMonth, Event};

const PRODUCT_ID: &str = concat!("-//", env!("CARGO_PKG_NAME"), "//", env!("CARGO_PKG_VERSION"), "//EN");

/// Builds a calendar from `events`, skipping those whose date or times do not
/// parse. Times are written as floating local times.
pub fn to_ics<'a, I>(name: impl Into<Cow<'a, str>>, events: I) -> ICalendar<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut icalendar = ICalendar::new("2.0", PRODUCT_ID);
    icalendar.push(Property::new("X-WR-CALNAME", escape_text(name)));

    for event in events {
        match event.to_ics() {
            Some(ics_event) => icalendar.add_event(ics_event),
            None => warn!(
                "Skipping event '{}' with unreadable date or time ({} {})",
                event.title,
                event.date,
                event.time_range()
            ),
        }
    }

    icalendar
}

/// All events of `month`.
pub fn month_calendar(month: DisplayedMonth, events: &[Event]) -> ICalendar<'_> {
    to_ics(
        month.label(),
        events
            .iter()
            .filter(|event| month.contains_date_key(&event.date)),
    )
}

impl Event {
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let start = NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(&self.end_time, "%H:%M").ok()?;

        let start = format!("{}T{}00", date.format("%Y%m%d"), start.format("%H%M"));
        let end = format!("{}T{}00", date.format("%Y%m%d"), end.format("%H%M"));

        let id = format!("{}_{}", start, uid_slug(&self.title));
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

        let mut ics_event = ics::Event::new(id, stamp);

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(self.title.as_str())));

        if is_css_color_name(&self.color) {
            ics_event.push(Property::new("COLOR", self.color.as_str()));
        } else if !self.color.is_empty() {
            ics_event.push(Property::new(COLOR_EXTENSION, escape_text(self.color.as_str())));
        }

        Some(ics_event)
    }
}

/// Hex and functional colors have no RFC 7986 form, they go here instead.
const COLOR_EXTENSION: &str = "X-EVENTGRID-COLOR";

/// Spaces become dashes, everything else that is not alphanumeric is dropped.
fn uid_slug(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

fn is_css_color_name(color: &str) -> bool {
    !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic())
}

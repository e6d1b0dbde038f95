use serde::Serialize;

use crate::Event;

/// An event annotated against the other events of its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithConflict<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    pub has_conflict: bool,
    /// Number of other same-day events overlapping this one.
    pub conflict_level: usize,
}

/// Minutes since midnight for `"HH:MM"`. The hour and minute are not range
/// checked, so `"25:70"` is 1570. Anything else yields `None`.
#[must_use]
pub fn parse_time(s: &str) -> Option<u32> {
    let (hours, minutes) = s.trim().split_once(':')?;
    let hours = hours.parse::<u32>().ok()?;
    let minutes = minutes.parse::<u32>().ok()?;

    hours.checked_mul(60)?.checked_add(minutes)
}

/// Half-open interval overlap; an interval ending where the other starts does
/// not overlap it.
#[must_use]
pub fn overlaps(start_a: u32, end_a: u32, start_b: u32, end_b: u32) -> bool {
    start_a < end_b && start_b < end_a
}

/// False as soon as any of the four times fails to parse.
#[must_use]
pub fn events_overlap(a: &Event, b: &Event) -> bool {
    let times = (
        parse_time(&a.start_time),
        parse_time(&a.end_time),
        parse_time(&b.start_time),
        parse_time(&b.end_time),
    );

    match times {
        (Some(start_a), Some(end_a), Some(start_b), Some(end_b)) => {
            overlaps(start_a, end_a, start_b, end_b)
        }
        _ => false,
    }
}

/// Pairwise check over one day's events. Output order follows input order.
pub fn annotate<'a, I>(day_events: I) -> Vec<EventWithConflict<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let events = day_events.into_iter().collect::<Vec<_>>();

    events
        .iter()
        .enumerate()
        .map(|(idx, &event)| {
            let conflict_level = events
                .iter()
                .enumerate()
                .filter(|&(other_idx, &other)| other_idx != idx && events_overlap(event, other))
                .count();

            EventWithConflict {
                event,
                has_conflict: conflict_level > 0,
                conflict_level,
            }
        })
        .collect()
}

/// Stable sort on the raw `startTime` text, which orders zero-padded times
/// the same way as their numeric value.
pub fn sort_by_start(events: &mut [EventWithConflict<'_>]) {
    events.sort_by(|a, b| a.event.start_time.cmp(&b.event.start_time));
}

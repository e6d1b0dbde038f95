use chrono::NaiveDate;
use serde::Serialize;

use crate::conflict::{annotate, sort_by_start, EventWithConflict};
use crate::event::events_on;
use crate::month::{is_today, Cell, Direction, DisplayedMonth, WEEKDAY_LABELS};
use crate::Event;

/// Maximum number of event chips shown inside a grid cell.
pub const PREVIEW_LIMIT: usize = 2;

/// Everything needed to draw one month: header, navigation targets and cells.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView<'a> {
    pub month: DisplayedMonth,
    pub label: String,
    pub prev: DisplayedMonth,
    pub next: DisplayedMonth,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<DayCell<'a>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell<'a> {
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub is_today: bool,
    /// Preview chips in source order, annotated against the whole day.
    pub events: Vec<EventWithConflict<'a>>,
    /// Events of the day not shown in `events`.
    pub overflow: usize,
}

/// Every event of one day, sorted by start time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail<'a> {
    pub date: String,
    pub label: String,
    pub events: Vec<EventWithConflict<'a>>,
}

impl<'a> MonthView<'a> {
    #[must_use]
    pub fn build(month: DisplayedMonth, events: &'a [Event], today: Option<NaiveDate>) -> Self {
        let cells = month
            .cells()
            .into_iter()
            .map(|cell| match cell {
                Cell::Empty => DayCell::default(),
                Cell::Day(day) => DayCell::build(month, day, events, today),
            })
            .collect();

        MonthView {
            month,
            label: month.label(),
            prev: month.navigate(Direction::Prev),
            next: month.navigate(Direction::Next),
            weekdays: WEEKDAY_LABELS,
            cells,
        }
    }

    /// Cells grouped into rows of seven. The last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> {
        self.cells.chunks(7)
    }
}

impl<'a> DayCell<'a> {
    fn build(month: DisplayedMonth, day: u32, events: &'a [Event], today: Option<NaiveDate>) -> Self {
        let date = month.date_key(day);
        let mut annotated = annotate(events_on(events, &date));
        let overflow = annotated.len().saturating_sub(PREVIEW_LIMIT);
        annotated.truncate(PREVIEW_LIMIT);

        DayCell {
            day: Some(day),
            date: Some(date),
            is_today: is_today(day, month, today),
            events: annotated,
            overflow,
        }
    }
}

impl<'a> DayDetail<'a> {
    #[must_use]
    pub fn build(date: NaiveDate, events: &'a [Event]) -> Self {
        let key = date.format("%Y-%m-%d").to_string();
        let mut annotated = annotate(events_on(events, &key));
        sort_by_start(&mut annotated);

        DayDetail {
            date: key,
            label: date.format("%A, %B %-d, %Y").to_string(),
            events: annotated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, title: &str, start: &str, end: &str) -> Event {
        Event {
            start_time: start.into(),
            end_time: end.into(),
            color: "#3b82f6".into(),
            title: title.into(),
            date: date.into(),
        }
    }

    fn march_2024() -> DisplayedMonth {
        DisplayedMonth::new(2024, 2).unwrap()
    }

    fn cell<'v, 'a>(view: &'v MonthView<'a>, day: u32) -> &'v DayCell<'a> {
        view.cells.iter().find(|cell| cell.day == Some(day)).unwrap()
    }

    #[test]
    fn header_and_navigation_targets() {
        let view = MonthView::build(march_2024(), &[], None);
        assert_eq!(view.label, "March 2024");
        assert_eq!(view.prev.to_string(), "2024-02");
        assert_eq!(view.next.to_string(), "2024-04");
        assert_eq!(view.weekdays[0], "Sun");
    }

    #[test]
    fn shell_renders_without_events() {
        let view = MonthView::build(march_2024(), &[], None);
        assert_eq!(view.cells.len(), 5 + 31);
        assert!(view.cells[..5].iter().all(|cell| cell.day.is_none()));
        assert!(view.cells.iter().all(|cell| cell.events.is_empty() && cell.overflow == 0));
        assert_eq!(view.weeks().count(), 6);
    }

    #[test]
    fn marks_today_only_when_known() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 12);
        let view = MonthView::build(march_2024(), &[], today);
        let todays = view.cells.iter().filter(|cell| cell.is_today).collect::<Vec<_>>();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].day, Some(12));

        let view = MonthView::build(march_2024(), &[], None);
        assert!(view.cells.iter().all(|cell| !cell.is_today));
    }

    #[test]
    fn preview_is_capped_but_conflicts_count_the_whole_day() {
        let events = [
            event("2024-03-05", "A", "09:00", "10:00"),
            event("2024-03-05", "B", "11:00", "12:00"),
            event("2024-03-05", "C", "09:30", "11:30"),
        ];
        let view = MonthView::build(march_2024(), &events, None);
        let day = cell(&view, 5);

        assert_eq!(day.events.len(), PREVIEW_LIMIT);
        assert_eq!(day.overflow, 1);
        assert_eq!(day.events[0].event.title, "A");
        assert_eq!(day.events[1].event.title, "B");
        assert!(day.events.iter().all(|annotated| annotated.conflict_level == 1));
    }

    #[test]
    fn detail_lists_everything_sorted() {
        let events = [
            event("2024-03-05", "Late", "16:00", "17:00"),
            event("2024-03-05", "Early", "08:00", "09:00"),
            event("2024-03-06", "Elsewhere", "08:00", "09:00"),
            event("2024-03-05", "Overlaps late", "16:30", "18:00"),
        ];
        let detail = DayDetail::build(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), &events);

        assert_eq!(detail.date, "2024-03-05");
        assert_eq!(detail.label, "Tuesday, March 5, 2024");
        let rows = detail
            .events
            .iter()
            .map(|annotated| (annotated.event.title.as_str(), annotated.has_conflict))
            .collect::<Vec<_>>();
        assert_eq!(rows, [("Early", false), ("Late", true), ("Overlaps late", true)]);
    }

    #[test]
    fn serializes_month_as_year_month() {
        let view = MonthView::build(march_2024(), &[], None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["month"], "2024-03");
        assert_eq!(json["prev"], "2024-02");
        assert_eq!(json["cells"][0]["day"], serde_json::Value::Null);
        assert_eq!(json["cells"][5]["date"], "2024-03-01");
    }
}

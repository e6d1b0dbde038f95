use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One position of the 7-column month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Day(u32),
}

impl Cell {
    #[must_use]
    pub fn day(self) -> Option<u32> {
        match self {
            Cell::Empty => None,
            Cell::Day(day) => Some(day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The month currently on screen. Owned by whoever renders, never global.
///
/// Serialized as `"YYYY-MM"` with a one-based month; the accessors use a
/// zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DisplayedMonth {
    first: NaiveDate,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month >= 12 {
            return Err(Error::InvalidMonth { year, month });
        }

        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .map(|first| Self { first })
            .ok_or(Error::InvalidMonth { year, month })
    }

    /// The month the given date falls in, used for the "Today" control.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month, January is 0.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    /// Weekday of the first of the month, Sunday = 0 through Saturday = 6.
    #[must_use]
    pub fn first_weekday_offset(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Day-of-month of "day 0 of the next month".
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        // Only December of the last representable year has no successor.
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Leading blanks followed by `1..=days_in_month`. Never padded at the end.
    #[must_use]
    pub fn cells(&self) -> Vec<Cell> {
        let offset = self.first_weekday_offset();
        let days = self.days_in_month();

        let mut cells = Vec::with_capacity((offset + days) as usize);
        cells.extend((0..offset).map(|_| Cell::Empty));
        cells.extend((1..=days).map(Cell::Day));
        cells
    }

    #[must_use]
    pub fn navigate(self, direction: Direction) -> Self {
        let shifted = match direction {
            Direction::Prev => self.first.checked_sub_months(Months::new(1)),
            Direction::Next => self.first.checked_add_months(Months::new(1)),
        };

        shifted.map_or(self, |first| Self { first })
    }

    /// `"YYYY-MM-DD"` key used to match events to a cell.
    #[must_use]
    pub fn date_key(&self, day: u32) -> String {
        format!("{self}-{day:02}")
    }

    #[must_use]
    pub fn contains_date_key(&self, date_key: &str) -> bool {
        date_key
            .strip_prefix(self.to_string().as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Header label, e.g. "March 2024".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month() as usize], self.year())
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() + 1)
    }
}

impl FromStr for DisplayedMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonthFormat(s.to_string());

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Self::new(year, month - 1)
    }
}

impl From<DisplayedMonth> for String {
    fn from(month: DisplayedMonth) -> String {
        month.to_string()
    }
}

impl TryFrom<String> for DisplayedMonth {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Grid cells for a zero-based `month` of `year`.
pub fn build(year: i32, month: u32) -> Result<Vec<Cell>> {
    DisplayedMonth::new(year, month).map(|displayed| displayed.cells())
}

pub fn first_weekday_offset(year: i32, month: u32) -> Result<u32> {
    DisplayedMonth::new(year, month).map(|displayed| displayed.first_weekday_offset())
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    DisplayedMonth::new(year, month).map(|displayed| displayed.days_in_month())
}

#[must_use]
pub fn navigate(current: DisplayedMonth, direction: Direction) -> DisplayedMonth {
    current.navigate(direction)
}

/// Calendar-date comparison only. False whenever `today` is unknown.
#[must_use]
pub fn is_today(day: u32, displayed: DisplayedMonth, today: Option<NaiveDate>) -> bool {
    today.is_some_and(|today| {
        today.day() == day && today.month0() == displayed.month() && today.year() == displayed.year()
    })
}

/// Parses a `"YYYY-MM-DD"` day as used by the day detail.
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> DisplayedMonth {
        DisplayedMonth::new(year, month).unwrap()
    }

    #[test]
    fn grid_length_is_offset_plus_days_with_trailing_day_sequence() {
        for year in 1899..=2101 {
            for m in 0..12 {
                let cells = build(year, m).unwrap();
                let offset = first_weekday_offset(year, m).unwrap() as usize;
                let days = days_in_month(year, m).unwrap();

                assert_eq!(cells.len(), offset + days as usize, "{year}-{m}");
                assert!(cells[..offset].iter().all(|cell| *cell == Cell::Empty));

                let tail = cells[offset..].iter().map(|cell| cell.day()).collect::<Vec<_>>();
                let expected = (1..=days).map(Some).collect::<Vec<_>>();
                assert_eq!(tail, expected, "{year}-{m}");
            }
        }
    }

    #[test]
    fn day_count_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1).unwrap(), 29);
        assert_eq!(days_in_month(2023, 1).unwrap(), 28);
        assert_eq!(days_in_month(1900, 1).unwrap(), 28);
        assert_eq!(days_in_month(2000, 1).unwrap(), 29);
        assert_eq!(days_in_month(2024, 3).unwrap(), 30);
        assert_eq!(days_in_month(2024, 11).unwrap(), 31);
    }

    #[test]
    fn offset_uses_sunday_zero() {
        // 2024-03-01 is a Friday, 2024-09-01 a Sunday.
        assert_eq!(first_weekday_offset(2024, 2).unwrap(), 5);
        assert_eq!(first_weekday_offset(2024, 8).unwrap(), 0);
        assert_eq!(build(2024, 8).unwrap()[0], Cell::Day(1));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(matches!(
            DisplayedMonth::new(2024, 12),
            Err(Error::InvalidMonth { year: 2024, month: 12 })
        ));
    }

    #[test]
    fn navigation_round_trips() {
        for m in 0..12 {
            let start = month(2024, m);
            assert_eq!(navigate(navigate(start, Direction::Next), Direction::Prev), start);
            assert_eq!(navigate(navigate(start, Direction::Prev), Direction::Next), start);
        }
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        assert_eq!(navigate(month(2024, 11), Direction::Next), month(2025, 0));
        assert_eq!(navigate(month(2024, 0), Direction::Prev), month(2023, 11));
    }

    #[test]
    fn navigation_does_not_touch_input() {
        let current = month(2024, 2);
        let next = current.navigate(Direction::Next);
        assert_eq!(current, month(2024, 2));
        assert_eq!(next, month(2024, 3));
    }

    #[test]
    fn containing_picks_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(DisplayedMonth::containing(date), month(2024, 2));
    }

    #[test]
    fn is_today_matches_full_calendar_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert!(is_today(5, month(2024, 2), today));
        assert!(!is_today(6, month(2024, 2), today));
        assert!(!is_today(5, month(2024, 3), today));
        assert!(!is_today(5, month(2023, 2), today));
    }

    #[test]
    fn is_today_is_false_without_reference() {
        let displayed = month(2024, 2);
        assert!((1..=31).all(|day| !is_today(day, displayed, None)));
    }

    #[test]
    fn text_forms() {
        let displayed = month(2024, 2);
        assert_eq!(displayed.to_string(), "2024-03");
        assert_eq!(displayed.label(), "March 2024");
        assert_eq!(displayed.date_key(5), "2024-03-05");
        assert!(displayed.contains_date_key("2024-03-31"));
        assert!(!displayed.contains_date_key("2024-04-01"));
        assert!(!displayed.contains_date_key("2024-030"));
    }

    #[test]
    fn parses_year_month() {
        assert_eq!("2024-03".parse::<DisplayedMonth>().unwrap(), month(2024, 2));
        assert_eq!(" 1999-12 ".parse::<DisplayedMonth>().unwrap(), month(1999, 11));
        assert!(matches!(
            "2024-13".parse::<DisplayedMonth>(),
            Err(Error::InvalidMonthFormat(_))
        ));
        assert!("March".parse::<DisplayedMonth>().is_err());
        assert!("2024-00".parse::<DisplayedMonth>().is_err());
    }

    #[test]
    fn parses_day() {
        assert_eq!(parse_day("2024-03-05").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(matches!(parse_day("2024-02-30"), Err(Error::InvalidDate(_))));
    }
}

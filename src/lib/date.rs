//! Calendar helpers on top of `chrono`
//!
//! Entries only store a `NaiveDate`, everything else (names of the day and
//! month, the week an entry belongs to) is derived here.

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

/// How dates are written in the journal file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS: [&str; 12] = [
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

/// Full english name of the day of the week (`"Monday"`, `"Tuesday"`, ...)
pub fn weekday_name(date: NaiveDate) -> &'static str {
    use Weekday::*;
    match date.weekday() {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

/// Full english name of the month (`"January"`, `"February"`, ...)
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// A calendar week, weeks start on Sunday
///
/// The days of January before the first Sunday of the year are in week `00`,
/// hence the week number is always in `0..=53`.
///
/// Ordering is chronological, and so is the ordering of the formatted
/// `YYYY-WW` keys since both components are zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Week that contains `date`
    pub fn of(date: NaiveDate) -> Self {
        let elapsed = date.ordinal0();
        let weekday = date.weekday().num_days_from_sunday();
        Self {
            year: date.year(),
            week: (elapsed + 7 - weekday) / 7,
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

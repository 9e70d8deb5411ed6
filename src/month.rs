use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};
use crate::grid::{self, DayGrid};

/// A single calendar month, identified by year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: Month,
}

impl CalendarMonth {
    pub fn new(year: i32, month: Month) -> Self {
        CalendarMonth { year, month }
    }

    /// Month of the given date.
    pub fn of<T: Datelike>(date: &T) -> Self {
        // `Datelike::month` is always within 1..=12
        let month = Month::from_u32(date.month()).unwrap_or(Month::January);
        CalendarMonth::new(date.year(), month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }

    /// The following month, rolling over into the next year after December.
    /// `None` if that month lies outside of the representable date range.
    pub fn succ(&self) -> Option<Self> {
        let next = if self.month == Month::December {
            CalendarMonth::new(self.year.checked_add(1)?, Month::January)
        } else {
            CalendarMonth::new(self.year, self.month.succ())
        };

        next.first_day().map(|_| next)
    }

    /// The preceding month, rolling over into the previous year before January.
    /// `None` if that month lies outside of the representable date range.
    pub fn pred(&self) -> Option<Self> {
        let prev = if self.month == Month::January {
            CalendarMonth::new(self.year.checked_sub(1)?, Month::December)
        } else {
            CalendarMonth::new(self.year, self.month.pred())
        };

        prev.first_day().map(|_| prev)
    }

    pub fn grid(&self) -> DayGrid {
        grid::build(self.year, self.month)
    }

    pub fn title(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

impl FromStr for CalendarMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::new(
                ErrorKind::InvalidMonth,
                &format!("'{}' is not of the form YYYY-MM", s),
            )
        };

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month
            .parse::<u32>()
            .ok()
            .and_then(Month::from_u32)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidMonth,
                    &format!("month in '{}' must be between 1 and 12", s),
                )
            })?;

        let calendar_month = CalendarMonth::new(year, month);
        calendar_month.first_day().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidMonth,
                &format!("year {} is out of range", year),
            )
        })?;

        Ok(calendar_month)
    }
}

impl Ord for CalendarMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then_with(|| {
            self.month
                .number_from_month()
                .cmp(&other.month.number_from_month())
        })
    }
}

impl PartialOrd for CalendarMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

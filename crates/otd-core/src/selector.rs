//! Day-of-year selection.
//!
//! A query names a month and a day; the year is irrelevant. Day counts use a
//! fixed leap reference year so 29 February is always selectable.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use schemars::JsonSchema;
use serde::Serialize;

use crate::date::{CanonicalDate, MONTH_NAMES, month_from_name, month_name};
use crate::errors::CoreError;

/// Leap year used for day counts.
pub const REFERENCE_LEAP_YEAR: i32 = 2024;

/// Number of selectable days in a 1-based month (February has 29).
///
/// # Errors
///
/// Returns [`CoreError::UnknownMonth`] if `month` is outside `1..=12`.
pub fn days_in_month(month: u32) -> Result<u32, CoreError> {
    let first = NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, 1)
        .ok_or_else(|| CoreError::UnknownMonth(month.to_string()))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month + 1, 1)
    }
    .ok_or_else(|| CoreError::UnknownMonth(month.to_string()))?;

    let days = next.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| CoreError::UnknownMonth(month.to_string()))
}

/// Parse a month given as a Dutch name (any case) or a number `1..=12`.
///
/// # Errors
///
/// Returns [`CoreError::UnknownMonth`] for anything else.
pub fn parse_month(raw: &str) -> Result<u32, CoreError> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(number);
        }
        return Err(CoreError::UnknownMonth(raw.to_string()));
    }
    month_from_name(trimmed).ok_or_else(|| CoreError::UnknownMonth(raw.to_string()))
}

/// A selected day-of-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub struct QueryDate {
    month: u32,
    day: u32,
}

impl QueryDate {
    /// Build a query date, validating the day against the leap reference year.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMonth`] or [`CoreError::InvalidDay`].
    pub fn new(month: u32, day: u32) -> Result<Self, CoreError> {
        let max = days_in_month(month)?;
        if day == 0 || day > max {
            return Err(CoreError::InvalidDay { month, day });
        }
        Ok(Self { month, day })
    }

    /// The day-of-year of an actual date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Today in local time.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn day(self) -> u32 {
        self.day
    }

    /// Same month and day, any year.
    #[must_use]
    pub fn matches(self, date: CanonicalDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = month_name(self.month).unwrap_or("?");
        write!(f, "{} {name}", self.day)
    }
}

/// Day and month pickers.
///
/// Changing the month clamps the day to the new month's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelector {
    day: u32,
    month: u32,
}

impl Default for DaySelector {
    fn default() -> Self {
        Self::today()
    }
}

impl DaySelector {
    /// Selector positioned on today's local date.
    #[must_use]
    pub fn today() -> Self {
        let query = QueryDate::today();
        Self {
            day: query.day,
            month: query.month,
        }
    }

    /// Selector positioned on a specific query date.
    #[must_use]
    pub const fn at(query: QueryDate) -> Self {
        Self {
            day: query.day,
            month: query.month,
        }
    }

    /// Select a day within the current month.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDay`] if the day is not in the month.
    pub fn set_day(&mut self, day: u32) -> Result<(), CoreError> {
        QueryDate::new(self.month, day)?;
        self.day = day;
        Ok(())
    }

    /// Select a month, clamping the day when the new month is shorter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMonth`] if `month` is outside `1..=12`.
    pub fn set_month(&mut self, month: u32) -> Result<(), CoreError> {
        let max = days_in_month(month)?;
        self.month = month;
        self.day = self.day.min(max);
        Ok(())
    }

    /// Jump back to today and return the query to run immediately.
    pub fn reset_to_today(&mut self) -> QueryDate {
        *self = Self::today();
        self.query()
    }

    /// Days offered by the day picker for the current month.
    #[must_use]
    pub fn day_options(&self) -> Vec<u32> {
        (1..=days_in_month(self.month).unwrap_or(31)).collect()
    }

    /// Month options as `(number, name)` pairs.
    #[must_use]
    pub fn month_options() -> Vec<(u32, &'static str)> {
        (1u32..).zip(MONTH_NAMES).collect()
    }

    #[must_use]
    pub const fn query(&self) -> QueryDate {
        QueryDate {
            month: self.month,
            day: self.day,
        }
    }
}

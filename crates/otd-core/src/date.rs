//! Canonical dates and normalization of catalog date metadata.
//!
//! Catalog dates arrive as free text: ISO `YYYY-MM-DD`, Dutch long form
//! (`15 maart 1990`), bare years, or anything else a contributor typed.
//! Only the first two shapes are accepted, and only when they name a real
//! calendar day. Construction never rolls over: `30 februari` is rejected
//! rather than turned into 2 March, and a bare `1970` is rejected rather than
//! read as 1 January.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::markup::strip_tags;

/// Dutch month names, January first. Matching is case-insensitive.
pub const MONTH_NAMES: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid ISO date regex")
});

static LONG_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let months = MONTH_NAMES.join("|");
    Regex::new(&format!(r"(?i)^([0-9]{{1,2}})\s+({months})\s+([0-9]{{4}})$"))
        .expect("valid long-form date regex")
});

/// A verified `YYYY-MM-DD` date that names a real calendar day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Build a date from its parts, rejecting anything that would roll over.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let verified = date.year() == year && date.month() == month && date.day() == day;
        verified.then_some(Self(date))
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CanonicalDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso(s).ok_or_else(|| CoreError::Validation(format!("not a canonical date: '{s}'")))
    }
}

/// Look up a Dutch month name (case-insensitive). Returns the 1-based month.
#[must_use]
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Dutch name for a 1-based month.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Normalize raw catalog date metadata into a canonical date.
///
/// Returns `None` for empty input, unknown shapes, and impossible days.
#[must_use]
pub fn normalize_date(raw: Option<&str>) -> Option<CanonicalDate> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let cleaned = strip_tags(raw);
    parse_iso(&cleaned).or_else(|| parse_long_form(&cleaned))
}

fn parse_iso(text: &str) -> Option<CanonicalDate> {
    let caps = ISO_RE.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    CanonicalDate::from_ymd(year, month, day)
}

fn parse_long_form(text: &str) -> Option<CanonicalDate> {
    let caps = LONG_FORM_RE.captures(text)?;
    let day = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year = caps[3].parse().ok()?;
    CanonicalDate::from_ymd(year, month, day)
}

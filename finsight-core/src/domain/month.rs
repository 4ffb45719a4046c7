//! Calendar month buckets

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Label used for activities without a usable transaction date
pub const UNDATED_LABEL: &str = "Undated";

/// How "current month" comparisons treat the year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthMatch {
    /// Same calendar month in any year (June 2023 matches June 2024)
    #[default]
    AnyYear,
    /// Same calendar month of the same year
    SameYear,
}

/// Order of the monthly time series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthOrdering {
    /// Order in which each month first appears in the input
    #[default]
    FirstSeen,
    /// Oldest month first, undated bucket last
    Chronological,
}

/// A calendar month, or the bucket for undated activities
///
/// Variant order makes `Undated` sort after every real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthKey {
    Month { year: i32, month: u32 },
    Undated,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        MonthKey::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn of_optional(date: Option<NaiveDate>) -> Self {
        date.map(Self::of).unwrap_or(MonthKey::Undated)
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        match *self {
            MonthKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            MonthKey::Undated => None,
        }
    }

    /// Last day of the month
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// The month `count` months before this one
    pub fn months_back(&self, count: u32) -> Option<MonthKey> {
        self.first_day()?
            .checked_sub_months(Months::new(count))
            .map(MonthKey::of)
    }

    /// Short display label, e.g. "Jan 2024"
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(first) => first.format("%b %Y").to_string(),
            None => UNDATED_LABEL.to_string(),
        }
    }

    /// ISO-style label, e.g. "2024-01"
    pub fn iso_label(&self) -> String {
        match self.first_day() {
            Some(first) => first.format("%Y-%m").to_string(),
            None => UNDATED_LABEL.to_string(),
        }
    }

    /// Whether `date` falls in the same month as this one
    pub fn matches(&self, date: Option<NaiveDate>, policy: MonthMatch) -> bool {
        match (*self, date) {
            (MonthKey::Month { year, month }, Some(date)) => match policy {
                MonthMatch::AnyYear => date.month() == month,
                MonthMatch::SameYear => date.month() == month && date.year() == year,
            },
            _ => false,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

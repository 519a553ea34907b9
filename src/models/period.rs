//! Budget recurrence periods and window calculation
//!
//! A budget recurs weekly or monthly; the window start is the inclusive
//! beginning of the current period, used to scope spend aggregation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurrence period of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePeriod {
    /// Calendar-month budgets (default)
    #[default]
    Monthly,

    /// ISO-week budgets, Monday through Sunday
    Weekly,
}

impl RecurrencePeriod {
    /// Get the first day of the period containing `reference`
    ///
    /// Monthly periods start on the first of the calendar month; weekly
    /// periods start on the Monday of the ISO week.
    pub fn window_start(&self, reference: NaiveDate) -> NaiveDate {
        match self {
            Self::Monthly => NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
                .unwrap_or(reference),
            Self::Weekly => {
                let days_into_week = reference.weekday().num_days_from_monday() as i64;
                reference - Duration::days(days_into_week)
            }
        }
    }

    /// Get the first instant (midnight) of the period containing `now`
    pub fn window_start_at(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.window_start(now.date()).and_time(NaiveTime::MIN)
    }
}

impl fmt::Display for RecurrencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for RecurrencePeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "weekly" | "week" => Ok(Self::Weekly),
            other => Err(PeriodParseError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    UnknownPeriod(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::UnknownPeriod(s) => {
                write!(f, "Unknown period '{}' (expected 'weekly' or 'monthly')", s)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

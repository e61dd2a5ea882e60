//! Month span model and resolution of optional year/month input.
//!
//! # Responsibility
//! - Turn a (year, month) pair into concrete first/last day bounds.
//! - Fill omitted parts from a caller-supplied "today".
//!
//! # Invariants
//! - `first_day.day() == 1` and `last_day` is the final day of the same month.
//! - Out-of-range months are rejected, never wrapped or clamped.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for (year, month) pairs that do not name a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthError {
    InvalidMonth { year: i32, month: u32 },
}

impl Display for MonthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { year, month } => {
                write!(f, "invalid month: year={year} month={month}; expected month 1-12")
            }
        }
    }
}

impl Error for MonthError {}

/// Concrete bounds of one calendar month.
///
/// Only built through `new`/`resolve`, which also guarantee that the whole
/// 6x7 grid around the month is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthSpan {
    /// Builds the span for an explicit year and month.
    ///
    /// # Errors
    /// - `InvalidMonth` when `month` is outside 1-12 or the year is not
    ///   representable.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthError> {
        let invalid = MonthError::InvalidMonth { year, month };
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid)?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(invalid)?;

        // The 6x7 grid reaches up to 6 days before and 41 days after day 1.
        first_day
            .checked_sub_days(Days::new(6))
            .and_then(|_| first_day.checked_add_days(Days::new(41)))
            .ok_or(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// Resolves optional input against `today`.
    ///
    /// Omitted `year` or `month` is taken from `today`. Each part defaults
    /// independently, so `(None, Some(3))` means March of the current year.
    pub fn resolve(
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, MonthError> {
        Self::new(
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
        )
    }

    /// Number of days in the month (28-31).
    pub fn len_days(&self) -> u32 {
        self.last_day.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }
}

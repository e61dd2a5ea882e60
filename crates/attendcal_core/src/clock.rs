//! Source of "today" for defaulted month and pivot parameters.
//!
//! # Invariants
//! - Core functions never read wall-clock time directly; they take a date
//!   argument, and only services consult a `Clock` to fill omitted values.

use chrono::{Local, NaiveDate};

/// Provides the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation backed by the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a single date. Used by tests and replayed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

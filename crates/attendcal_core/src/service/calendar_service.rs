//! Attendance calendar use-case service.
//!
//! # Responsibility
//! - Fetch record snapshots from the repository and feed the pure calendar
//!   and report builders.
//! - Own every record mutation (save, mark attended, delete, scheduling).
//!
//! # Invariants
//! - Omitted year/month/pivot values come from the injected `Clock` only.
//! - Mutating a missing id is not an error; the outcome is reported through
//!   the return value instead.
//! - Store failures propagate unchanged and are never retried here.

use crate::calendar::view::{build_calendar_view, CalendarView};
use crate::clock::Clock;
use crate::config::{is_allowed_weekday, COST_PER_ATTENDANCE};
use crate::model::month::{MonthError, MonthSpan};
use crate::model::record::{AttendanceRecord, RecordId};
use crate::report::aggregate::{daily_summaries, DaySummary};
use crate::report::financial::{financial_report, FinancialReport};
use crate::report::outlook::{month_outlook, MonthOutlook};
use crate::repo::attendance_repo::{AttendanceRepository, RepoError};
use chrono::{Datelike, Days, Months, NaiveDate};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for attendance use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Requested (year, month) is not a calendar month.
    InvalidMonth(MonthError),
    /// Range start is after range end.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// Person name is blank after trim.
    InvalidPersonName,
    /// Schedule start falls on a day closed for visits.
    DisallowedWeekday(NaiveDate),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(err) => write!(f, "{err}"),
            Self::InvalidRange { start, end } => {
                write!(f, "invalid date range: start {start} is after end {end}")
            }
            Self::InvalidPersonName => write!(f, "person name must not be blank"),
            Self::DisallowedWeekday(date) => write!(
                f,
                "visits cannot be scheduled on {} ({date})",
                date.format("%A")
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMonth(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidRange { .. } | Self::InvalidPersonName | Self::DisallowedWeekday(_) => {
                None
            }
        }
    }
}

impl From<MonthError> for ServiceError {
    fn from(value: MonthError) -> Self {
        Self::InvalidMonth(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over an attendance repository and a clock.
pub struct CalendarService<R: AttendanceRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: AttendanceRepository, C: Clock> CalendarService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Resolves optional year/month against the service clock.
    pub fn month_span(&self, year: Option<i32>, month: Option<u32>) -> ServiceResult<MonthSpan> {
        Ok(MonthSpan::resolve(year, month, self.clock.today())?)
    }

    /// Creates or replaces one record; the person name is stored trimmed.
    ///
    /// Returns `None` when `record.id` names a row that no longer exists.
    pub fn save_attendance(
        &self,
        record: &AttendanceRecord,
    ) -> ServiceResult<Option<AttendanceRecord>> {
        let person_name = record.person_name.trim();
        if person_name.is_empty() {
            return Err(ServiceError::InvalidPersonName);
        }

        let record = AttendanceRecord {
            person_name: person_name.to_string(),
            ..record.clone()
        };
        let saved = self.repo.save(&record)?;
        debug!(
            "event=attendance_save module=service status=ok insert={} stored={}",
            !record.is_persisted(),
            saved.is_some()
        );
        Ok(saved)
    }

    /// Deletes a record; returns whether anything was removed.
    pub fn delete_attendance(&self, id: RecordId) -> ServiceResult<bool> {
        let removed = self.repo.delete_by_id(id)?;
        info!("event=attendance_delete module=service status=ok record_id={id} removed={removed}");
        Ok(removed)
    }

    /// Sets the attended flag of one record and writes back the updated copy.
    ///
    /// Returns `None` without error when `id` does not exist.
    pub fn update_attendance(
        &self,
        id: RecordId,
        attended: bool,
    ) -> ServiceResult<Option<AttendanceRecord>> {
        let Some(current) = self.repo.find_by_id(id)? else {
            info!("event=attendance_update module=service status=missing record_id={id}");
            return Ok(None);
        };

        let updated = self.repo.save(&current.with_attended(attended))?;
        info!(
            "event=attendance_update module=service status=ok record_id={id} attended={attended}"
        );
        Ok(updated)
    }

    /// Schedules weekly visits from `start` through the end of its month.
    pub fn init_monthly_schedule(
        &self,
        person_name: &str,
        start: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceRecord>> {
        self.init_schedule(person_name, start, 1)
    }

    /// Schedules weekly visits from `start` through the end of the month
    /// `months - 1` months later. `months == 0` schedules nothing.
    pub fn init_schedule(
        &self,
        person_name: &str,
        start: NaiveDate,
        months: u32,
    ) -> ServiceResult<Vec<AttendanceRecord>> {
        let person_name = person_name.trim();
        if person_name.is_empty() {
            return Err(ServiceError::InvalidPersonName);
        }
        if !is_allowed_weekday(start.weekday()) {
            return Err(ServiceError::DisallowedWeekday(start));
        }
        if months == 0 {
            return Ok(Vec::new());
        }

        let start_span = MonthSpan::resolve(None, None, start)?;
        let last_span = start_span
            .first_day
            .checked_add_months(Months::new(months - 1))
            .ok_or(MonthError::InvalidMonth {
                year: start_span.year,
                month: start_span.month,
            })
            .and_then(|first| MonthSpan::resolve(None, None, first))?;

        let mut created = Vec::new();
        let mut date = start;
        while date <= last_span.last_day {
            let record = AttendanceRecord::new(person_name, date);
            if let Some(saved) = self.repo.save(&record)? {
                created.push(saved);
            }
            match date.checked_add_days(Days::new(7)) {
                Some(next) => date = next,
                None => break,
            }
        }

        info!(
            "event=schedule_init module=service status=ok start={start} months={months} created={}",
            created.len()
        );
        Ok(created)
    }

    /// Records dated within `[start, end]`, ordered by date then id.
    pub fn records_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceRecord>> {
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }
        Ok(self.repo.find_by_date_range(start, end)?)
    }

    /// Records of one day, ordered by id.
    pub fn records_on(&self, date: NaiveDate) -> ServiceResult<Vec<AttendanceRecord>> {
        Ok(self.repo.find_by_visit_date(date)?)
    }

    /// Attended visits within `[start, end]` times the per-visit rate.
    pub fn total_cost(&self, start: NaiveDate, end: NaiveDate) -> ServiceResult<i64> {
        let attended = self
            .records_between(start, end)?
            .iter()
            .filter(|record| record.attended)
            .count() as i64;
        Ok(attended * COST_PER_ATTENDANCE)
    }

    /// Per-day visit totals within `[start, end]`, ascending by date.
    pub fn daily_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<DaySummary>> {
        Ok(daily_summaries(&self.records_between(start, end)?))
    }

    /// Financial report for one month; `pivot` defaults to today.
    pub fn monthly_financial_report(
        &self,
        year: i32,
        month: u32,
        pivot: Option<NaiveDate>,
    ) -> ServiceResult<FinancialReport> {
        let span = MonthSpan::new(year, month)?;
        let pivot = pivot.unwrap_or_else(|| self.clock.today());
        let records = self.records_between(span.first_day, span.last_day)?;
        debug!(
            "event=financial_report module=service status=ok year={year} month={month} pivot={pivot} records={}",
            records.len()
        );
        Ok(financial_report(year, month, &records, pivot))
    }

    /// Status counts and per-person outlook for one month; `pivot` defaults
    /// to today.
    pub fn month_outlook(
        &self,
        year: i32,
        month: u32,
        pivot: Option<NaiveDate>,
    ) -> ServiceResult<MonthOutlook> {
        let span = MonthSpan::new(year, month)?;
        let pivot = pivot.unwrap_or_else(|| self.clock.today());
        let records = self.records_between(span.first_day, span.last_day)?;
        Ok(month_outlook(&span, &records, pivot))
    }

    /// Calendar view for a month; omitted parts default to today's month.
    pub fn prepare_calendar(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> ServiceResult<CalendarView> {
        let span = self.month_span(year, month)?;
        let records = self.records_between(span.first_day, span.last_day)?;
        debug!(
            "event=calendar_view module=service status=ok year={} month={} days={} records={}",
            span.year,
            span.month,
            span.len_days(),
            records.len()
        );
        Ok(build_calendar_view(&span, &records))
    }
}

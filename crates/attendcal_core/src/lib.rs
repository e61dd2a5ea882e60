//! Core domain logic for attendcal.
//! This crate is the single source of truth for calendar and billing invariants.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use calendar::grid::{build_grid, group_by_date, CalendarGrid, DayCell, RecordsByDate};
pub use calendar::view::{build_calendar_view, CalendarView};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ALLOWED_WEEKDAYS, COST_PER_ATTENDANCE, TAX_AMOUNT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::month::{MonthError, MonthSpan};
pub use model::record::{AttendanceRecord, RecordId, RecordValidationError};
pub use report::aggregate::{daily_summaries, person_summaries, DaySummary, PersonSummary};
pub use report::financial::{financial_report, FinancialReport, StatusCounts, VisitStatus};
pub use report::outlook::{month_outlook, MonthOutlook};
pub use repo::attendance_repo::{
    AttendanceRepository, RepoError, RepoResult, SqliteAttendanceRepository,
};
pub use service::calendar_service::{CalendarService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

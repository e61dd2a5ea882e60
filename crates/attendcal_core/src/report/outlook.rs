//! Month outlook: status counts plus per-person upcoming visits.

use crate::model::month::MonthSpan;
use crate::model::record::AttendanceRecord;
use crate::report::aggregate::{amount_for, person_summaries, PersonSummary};
use crate::report::financial::StatusCounts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOutlook {
    pub year: i32,
    pub month: u32,
    pub lessons_total: u32,
    pub lessons_completed: u32,
    pub lessons_missed: u32,
    pub lessons_future: u32,
    pub cost_total: i64,
    pub cost_earned: i64,
    pub cost_missed: i64,
    /// Earned plus still-possible future revenue.
    pub cost_possible: i64,
    pub persons: Vec<PersonSummary>,
}

/// Builds the outlook for `span` from the records dated inside it; other
/// records are skipped.
pub fn month_outlook(span: &MonthSpan, records: &[AttendanceRecord], pivot: NaiveDate) -> MonthOutlook {
    let in_span: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| span.contains(record.visit_date))
        .cloned()
        .collect();
    let counts = StatusCounts::tally(&in_span, pivot);
    let amount = |count: u32| amount_for(count as usize);

    MonthOutlook {
        year: span.year,
        month: span.month,
        lessons_total: counts.total(),
        lessons_completed: counts.completed,
        lessons_missed: counts.missed,
        lessons_future: counts.future,
        cost_total: amount(counts.total()),
        cost_earned: amount(counts.completed),
        cost_missed: amount(counts.missed),
        cost_possible: amount(counts.completed + counts.future),
        persons: person_summaries(&in_span, pivot),
    }
}

//! Monthly financial report.
//!
//! # Responsibility
//! - Partition a month's records into completed, missed and future visits.
//! - Derive revenue per partition and the net-of-tax projection.
//!
//! # Invariants
//! - Only records dated in the target month are counted.
//! - Partitions are disjoint and cover the counted records:
//!   `completed_count + missed_count + future_count == total_lessons`.
//! - `expected_gross_revenue == earned_revenue + future_potential_revenue`.
//! - `expected_net_revenue == expected_gross_revenue - TAX_AMOUNT`; it may be
//!   negative and is never clamped.
//! - The attended flag of future visits is ignored for partitioning.

use crate::config::{COST_PER_ATTENDANCE, TAX_AMOUNT};
use crate::model::record::AttendanceRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Temporal class of one visit relative to a pivot date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// On or before the pivot and attended.
    Completed,
    /// On or before the pivot and not attended.
    Missed,
    /// After the pivot.
    Future,
}

impl VisitStatus {
    pub fn classify(record: &AttendanceRecord, pivot: NaiveDate) -> Self {
        if record.visit_date > pivot {
            Self::Future
        } else if record.attended {
            Self::Completed
        } else {
            Self::Missed
        }
    }
}

/// Visit counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub completed: u32,
    pub missed: u32,
    pub future: u32,
}

impl StatusCounts {
    pub fn tally(records: &[AttendanceRecord], pivot: NaiveDate) -> Self {
        let mut counts = Self::default();
        for record in records {
            match VisitStatus::classify(record, pivot) {
                VisitStatus::Completed => counts.completed += 1,
                VisitStatus::Missed => counts.missed += 1,
                VisitStatus::Future => counts.future += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.completed + self.missed + self.future
    }
}

/// Financial figures for one month at one pivot date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub year: i32,
    pub month: u32,
    pub total_lessons: u32,
    pub total_revenue: i64,
    pub completed_count: u32,
    pub earned_revenue: i64,
    pub missed_count: u32,
    pub missed_revenue: i64,
    pub future_count: u32,
    pub future_potential_revenue: i64,
    pub expected_gross_revenue: i64,
    pub tax: i64,
    pub expected_net_revenue: i64,
    pub lost_revenue: i64,
}

/// Builds the report for `year`/`month`; records dated in other months are
/// skipped.
pub fn financial_report(
    year: i32,
    month: u32,
    records: &[AttendanceRecord],
    pivot: NaiveDate,
) -> FinancialReport {
    let in_month: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| record.visit_date.year() == year && record.visit_date.month() == month)
        .cloned()
        .collect();
    let counts = StatusCounts::tally(&in_month, pivot);
    let revenue = |count: u32| i64::from(count) * COST_PER_ATTENDANCE;

    let earned_revenue = revenue(counts.completed);
    let missed_revenue = revenue(counts.missed);
    let future_potential_revenue = revenue(counts.future);
    let expected_gross_revenue = earned_revenue + future_potential_revenue;

    FinancialReport {
        year,
        month,
        total_lessons: counts.total(),
        total_revenue: revenue(counts.total()),
        completed_count: counts.completed,
        earned_revenue,
        missed_count: counts.missed,
        missed_revenue,
        future_count: counts.future,
        future_potential_revenue,
        expected_gross_revenue,
        tax: TAX_AMOUNT,
        expected_net_revenue: expected_gross_revenue - TAX_AMOUNT,
        lost_revenue: missed_revenue,
    }
}

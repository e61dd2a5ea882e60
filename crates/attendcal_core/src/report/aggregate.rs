//! Per-day and per-person attendance aggregation.
//!
//! # Responsibility
//! - Group records by visit date into daily totals and earnings.
//! - Group records by person into a forward-looking outlook split by pivot.
//!
//! # Invariants
//! - Output order is deterministic: dates ascending, names ascending.
//! - `attended_count <= total_count` for every day.
//! - Person summaries only count records strictly after the pivot date.

use crate::config::COST_PER_ATTENDANCE;
use crate::model::record::AttendanceRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visit counts and earnings for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_count: u32,
    pub attended_count: u32,
    /// `attended_count * COST_PER_ATTENDANCE`.
    pub earnings: i64,
}

/// Upcoming visits of one person relative to a pivot date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub name: String,
    pub dates_attended: Vec<NaiveDate>,
    pub dates_missed: Vec<NaiveDate>,
    pub cost_earned: i64,
    pub cost_missed: i64,
}

/// Builds one summary per distinct visit date, ascending by date.
pub fn daily_summaries(records: &[AttendanceRecord]) -> Vec<DaySummary> {
    let mut by_date: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for record in records {
        let (total, attended) = by_date.entry(record.visit_date).or_default();
        *total += 1;
        if record.attended {
            *attended += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (total_count, attended_count))| DaySummary {
            date,
            total_count,
            attended_count,
            earnings: i64::from(attended_count) * COST_PER_ATTENDANCE,
        })
        .collect()
}

/// Builds one summary per person, ascending by name.
///
/// Only records dated after `pivot` are classified: attended ones go to
/// `dates_attended`, the rest to `dates_missed`. A person whose records all
/// fall on or before the pivot is still listed, with empty dates.
pub fn person_summaries(records: &[AttendanceRecord], pivot: NaiveDate) -> Vec<PersonSummary> {
    let mut by_person: BTreeMap<&str, (Vec<NaiveDate>, Vec<NaiveDate>)> = BTreeMap::new();
    for record in records {
        let (attended, missed) = by_person.entry(record.person_name.as_str()).or_default();
        if record.visit_date <= pivot {
            continue;
        }
        if record.attended {
            attended.push(record.visit_date);
        } else {
            missed.push(record.visit_date);
        }
    }

    by_person
        .into_iter()
        .map(|(name, (mut dates_attended, mut dates_missed))| {
            dates_attended.sort_unstable();
            dates_missed.sort_unstable();
            PersonSummary {
                name: name.to_string(),
                cost_earned: amount_for(dates_attended.len()),
                cost_missed: amount_for(dates_missed.len()),
                dates_attended,
                dates_missed,
            }
        })
        .collect()
}

pub(crate) fn amount_for(count: usize) -> i64 {
    count as i64 * COST_PER_ATTENDANCE
}

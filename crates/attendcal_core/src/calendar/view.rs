//! Calendar view assembly.
//!
//! Combines the grid with month totals and the static label tables into the
//! shape returned by the calendar endpoint.

use crate::calendar::grid::{build_grid, group_by_date, CalendarGrid};
use crate::config::{ALLOWED_WEEKDAYS, COST_PER_ATTENDANCE};
use crate::model::locale::{month_names, weekday_label};
use crate::model::month::MonthSpan;
use crate::model::record::AttendanceRecord;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar response for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub weeks: CalendarGrid,
    /// Attended visits inside the month times the per-visit rate.
    pub total_cost: i64,
    pub attended_count: u32,
    pub month_names: BTreeMap<u32, String>,
    pub allowed_days: Vec<Weekday>,
    /// Column headers for the allowed days, in week order.
    pub week_days: Vec<String>,
}

/// Builds the calendar view for `span` from the records of that month.
///
/// Totals count only records dated inside `span`; records on adjacent-month
/// filler days still appear in their grid cells.
pub fn build_calendar_view(span: &MonthSpan, records: &[AttendanceRecord]) -> CalendarView {
    let grid = build_grid(span, &group_by_date(records));
    let attended_count = records
        .iter()
        .filter(|record| span.contains(record.visit_date) && record.attended)
        .count() as u32;

    CalendarView {
        year: span.year,
        month: span.month,
        weeks: grid,
        total_cost: i64::from(attended_count) * COST_PER_ATTENDANCE,
        attended_count,
        month_names: month_names()
            .into_iter()
            .map(|(month, name)| (month, name.to_string()))
            .collect(),
        allowed_days: ALLOWED_WEEKDAYS.to_vec(),
        week_days: ALLOWED_WEEKDAYS
            .iter()
            .map(|weekday| weekday_label(*weekday).to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::build_calendar_view;
    use crate::model::month::MonthSpan;
    use crate::model::record::AttendanceRecord;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn totals_count_attended_visits_inside_month() {
        let span = MonthSpan::new(2024, 2).unwrap();
        let records = vec![
            AttendanceRecord::new("Anya", date(2024, 2, 1)).with_attended(true),
            AttendanceRecord::new("Anya", date(2024, 2, 8)),
            AttendanceRecord::new("Boris", date(2024, 2, 8)).with_attended(true),
        ];

        let view = build_calendar_view(&span, &records);

        assert_eq!(view.year, 2024);
        assert_eq!(view.month, 2);
        assert_eq!(view.attended_count, 2);
        assert_eq!(view.total_cost, 2_500);
        assert!(view.attended_count as usize <= records.len());
        assert_eq!(view.month_names.len(), 12);
        assert_eq!(view.week_days, vec!["Вт", "Чт", "Пт", "Вс"]);
    }

    #[test]
    fn serialized_view_keeps_six_by_seven_weeks() {
        let span = MonthSpan::new(2024, 2).unwrap();
        let view = build_calendar_view(&span, &[]);
        let json = serde_json::to_value(&view).unwrap();

        let weeks = json["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|week| week.as_array().unwrap().len() == 7));
        assert_eq!(json["weeks"][0][0]["date"], "2024-01-29");
        assert_eq!(json["weeks"][0][0]["records"], serde_json::json!([]));
        assert_eq!(json["month_names"]["1"], "Январь");
    }
}

//! Fixed 6x7 month grid construction.
//!
//! # Responsibility
//! - Lay out a month as six Monday-first weeks of seven days.
//! - Attach each record to the single cell carrying its visit date.
//!
//! # Invariants
//! - The grid always has exactly 42 cells, enforced by its array type.
//! - The first cell is the Monday on or before the first day of the month.
//! - Cells are consecutive days; no month length or alignment is special-cased.
//! - A date without records yields an empty list, never a missing one.

use crate::model::month::MonthSpan;
use crate::model::record::AttendanceRecord;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WEEKS_PER_GRID: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

/// Records keyed by visit date, in ascending date order.
pub type RecordsByDate = BTreeMap<NaiveDate, Vec<AttendanceRecord>>;

/// One day of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `false` for leading/trailing days borrowed from adjacent months.
    pub in_current_month: bool,
    pub records: Vec<AttendanceRecord>,
}

/// Six ordered weeks of seven ordered days (Monday..Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarGrid {
    pub weeks: [[DayCell; DAYS_PER_WEEK]; WEEKS_PER_GRID],
}

impl CalendarGrid {
    /// Iterates all 42 cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.weeks[0][0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.weeks[WEEKS_PER_GRID - 1][DAYS_PER_WEEK - 1].date
    }

    /// Finds the cell for `date`, if the grid covers it.
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date == date)
    }
}

/// Returns the Monday on or before the first day of `span`.
pub fn grid_start(span: &MonthSpan) -> NaiveDate {
    let shift = u64::from(span.first_day.weekday().num_days_from_monday());
    span.first_day - Days::new(shift)
}

/// Groups records by visit date, keeping input order within each date.
pub fn group_by_date<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> RecordsByDate {
    let mut by_date = RecordsByDate::new();
    for record in records {
        by_date
            .entry(record.visit_date)
            .or_default()
            .push(record.clone());
    }
    by_date
}

/// Builds the 6x7 grid for `span`, annotating cells from `records_by_date`.
///
/// Records dated outside the 42 covered days are ignored.
pub fn build_grid(span: &MonthSpan, records_by_date: &RecordsByDate) -> CalendarGrid {
    let start = grid_start(span);

    let weeks: [[DayCell; DAYS_PER_WEEK]; WEEKS_PER_GRID] = std::array::from_fn(|week| {
        std::array::from_fn(|day| {
            let offset = (week * DAYS_PER_WEEK + day) as u64;
            let date = start + Days::new(offset);
            DayCell {
                date,
                in_current_month: date.year() == span.year && date.month() == span.month,
                records: records_by_date.get(&date).cloned().unwrap_or_default(),
            }
        })
    });

    CalendarGrid { weeks }
}

#[cfg(test)]
mod tests {
    use super::{build_grid, grid_start, group_by_date, RecordsByDate};
    use crate::model::month::MonthSpan;
    use crate::model::record::AttendanceRecord;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_february_grid_spans_expected_dates() {
        let span = MonthSpan::new(2024, 2).unwrap();
        let grid = build_grid(&span, &RecordsByDate::new());

        assert_eq!(grid.first_date(), date(2024, 1, 29));
        assert_eq!(grid.last_date(), date(2024, 3, 10));
        assert!(!grid.weeks[0][0].in_current_month);
        assert!(grid.weeks[0][3].in_current_month);
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_filler() {
        // 2024-01-01 is a Monday.
        let span = MonthSpan::new(2024, 1).unwrap();
        assert_eq!(grid_start(&span), date(2024, 1, 1));

        let grid = build_grid(&span, &RecordsByDate::new());
        assert!(grid.weeks[0].iter().all(|cell| cell.in_current_month));
    }

    #[test]
    fn every_month_has_42_consecutive_cells_starting_monday() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let span = MonthSpan::new(year, month).unwrap();
                let grid = build_grid(&span, &RecordsByDate::new());

                assert_eq!(grid.cells().count(), 42);
                assert_eq!(grid.first_date().weekday(), Weekday::Mon);
                assert!(grid.first_date() <= span.first_day);
                assert!(grid.last_date() >= span.last_day);

                let dates: Vec<_> = grid.cells().map(|cell| cell.date).collect();
                assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));

                let in_month = grid.cells().filter(|cell| cell.in_current_month).count();
                assert_eq!(in_month as u32, span.len_days());
            }
        }
    }

    #[test]
    fn records_sharing_a_date_land_in_one_cell() {
        let span = MonthSpan::new(2024, 2).unwrap();
        let records = vec![
            AttendanceRecord::new("Anya", date(2024, 2, 8)).with_id(1),
            AttendanceRecord::new("Boris", date(2024, 2, 8)).with_id(2),
            AttendanceRecord::new("Anya", date(2024, 2, 15)).with_id(3),
        ];
        let grid = build_grid(&span, &group_by_date(&records));

        let cell = grid.cell(date(2024, 2, 8)).unwrap();
        assert_eq!(cell.records, records[..2].to_vec());
        assert_eq!(
            grid.cells()
                .filter(|cell| cell.records.iter().any(|r| r.id == Some(3)))
                .count(),
            1
        );
        assert!(grid.cell(date(2024, 2, 9)).unwrap().records.is_empty());
    }

    #[test]
    fn trailing_cells_pick_up_adjacent_month_records() {
        let span = MonthSpan::new(2024, 2).unwrap();
        let records = vec![AttendanceRecord::new("Anya", date(2024, 3, 1))];
        let grid = build_grid(&span, &group_by_date(&records));

        let cell = grid.cell(date(2024, 3, 1)).unwrap();
        assert!(!cell.in_current_month);
        assert_eq!(cell.records.len(), 1);
    }

    #[test]
    fn building_twice_yields_identical_grids() {
        let span = MonthSpan::new(2025, 6).unwrap();
        let records = vec![
            AttendanceRecord::new("Vera", date(2025, 6, 3)).with_id(5),
            AttendanceRecord::new("Anya", date(2025, 6, 3)).with_id(2),
        ];
        let by_date = group_by_date(&records);
        assert_eq!(build_grid(&span, &by_date), build_grid(&span, &by_date));
    }
}

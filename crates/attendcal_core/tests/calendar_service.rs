use attendcal_core::db::open_db_in_memory;
use attendcal_core::{
    AttendanceRecord, CalendarService, FixedClock, ServiceError, SqliteAttendanceRepository,
};
use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::Connection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service(
    conn: &Connection,
    today: NaiveDate,
) -> CalendarService<SqliteAttendanceRepository<'_>, FixedClock> {
    CalendarService::new(SqliteAttendanceRepository::new(conn), FixedClock(today))
}

fn seed(service: &CalendarService<SqliteAttendanceRepository<'_>, FixedClock>) {
    for (name, d, attended) in [
        ("Anya", date(2024, 2, 1), true),
        ("Anya", date(2024, 2, 8), false),
        ("Boris", date(2024, 2, 8), true),
        ("Anya", date(2024, 2, 22), false),
        ("Anya", date(2024, 3, 1), true),
    ] {
        let record = AttendanceRecord::new(name, d).with_attended(attended);
        service.save_attendance(&record).unwrap();
    }
}

#[test]
fn financial_report_scenario_excludes_other_months() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 15));
    for (d, attended) in [
        (date(2024, 2, 1), true),
        (date(2024, 2, 8), false),
        (date(2024, 3, 1), true),
    ] {
        service
            .save_attendance(&AttendanceRecord::new("Anya", d).with_attended(attended))
            .unwrap();
    }

    let report = service
        .monthly_financial_report(2024, 2, Some(date(2024, 2, 15)))
        .unwrap();

    assert_eq!(report.completed_count, 1);
    assert_eq!(report.missed_count, 1);
    assert_eq!(report.future_count, 0);
    assert_eq!(report.earned_revenue, 1_250);
    assert_eq!(report.missed_revenue, 1_250);
}

#[test]
fn financial_report_pivot_defaults_to_clock_today() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    let report = service.monthly_financial_report(2024, 2, None).unwrap();

    assert_eq!(report.total_lessons, 4);
    assert_eq!(report.completed_count, 2);
    assert_eq!(report.missed_count, 1);
    assert_eq!(report.future_count, 1);
    assert_eq!(report.expected_gross_revenue, 3_750);
    assert_eq!(report.expected_net_revenue, 3_750 - 6_500);
}

#[test]
fn financial_report_rejects_invalid_month() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));

    let err = service.monthly_financial_report(2024, 13, None).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidMonth(_)));
}

#[test]
fn prepare_calendar_defaults_to_current_month() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    let view = service.prepare_calendar(None, None).unwrap();

    assert_eq!((view.year, view.month), (2024, 2));
    assert_eq!(view.weeks.first_date(), date(2024, 1, 29));
    assert_eq!(view.weeks.last_date(), date(2024, 3, 10));
    assert_eq!(view.attended_count, 2);
    assert_eq!(view.total_cost, 2_500);
    assert_eq!(view.weeks.cell(date(2024, 2, 8)).unwrap().records.len(), 2);
    // Out-of-month records are not fetched for the grid.
    assert!(view.weeks.cell(date(2024, 3, 1)).unwrap().records.is_empty());
}

#[test]
fn prepare_calendar_places_every_month_record_in_one_cell() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    let span = service.month_span(Some(2024), Some(2)).unwrap();
    let view = service.prepare_calendar(Some(2024), Some(2)).unwrap();

    for record in service.records_between(span.first_day, span.last_day).unwrap() {
        let holders = view
            .weeks
            .cells()
            .filter(|cell| cell.records.contains(&record))
            .count();
        assert_eq!(holders, 1);
    }
}

#[test]
fn prepare_calendar_rejects_month_out_of_range() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));

    assert!(matches!(
        service.prepare_calendar(Some(2024), Some(0)),
        Err(ServiceError::InvalidMonth(_))
    ));
}

#[test]
fn daily_summaries_are_sorted_and_bounded() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    let summaries = service
        .daily_summaries(date(2024, 2, 1), date(2024, 2, 29))
        .unwrap();

    let dates: Vec<_> = summaries.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 2, 8), date(2024, 2, 22)]);
    assert_eq!(summaries[1].total_count, 2);
    assert_eq!(summaries[1].attended_count, 1);
    assert_eq!(summaries[1].earnings, 1_250);
    assert!(summaries.iter().all(|s| s.attended_count <= s.total_count));
}

#[test]
fn reversed_range_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));

    let err = service
        .daily_summaries(date(2024, 2, 29), date(2024, 2, 1))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRange { .. }));
}

#[test]
fn total_cost_counts_attended_visits() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    assert_eq!(
        service.total_cost(date(2024, 2, 1), date(2024, 3, 31)).unwrap(),
        3 * 1_250
    );
}

#[test]
fn update_attendance_toggles_flag_and_ignores_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    let saved = service
        .save_attendance(&AttendanceRecord::new("Anya", date(2024, 2, 1)))
        .unwrap()
        .unwrap();
    let id = saved.id.unwrap();

    let updated = service.update_attendance(id, true).unwrap().unwrap();
    assert!(updated.attended);
    assert!(service.records_on(date(2024, 2, 1)).unwrap()[0].attended);

    assert_eq!(service.update_attendance(9_999, true).unwrap(), None);
}

#[test]
fn delete_attendance_reports_whether_row_existed() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    let id = service
        .save_attendance(&AttendanceRecord::new("Anya", date(2024, 2, 1)))
        .unwrap()
        .unwrap()
        .id
        .unwrap();

    assert!(service.delete_attendance(id).unwrap());
    assert!(!service.delete_attendance(id).unwrap());
}

#[test]
fn save_attendance_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));

    let err = service
        .save_attendance(&AttendanceRecord::new("", date(2024, 2, 1)))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidPersonName));
}

#[test]
fn monthly_schedule_creates_weekly_visits_until_month_end() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 1));

    // 2024-02-06 is a Tuesday.
    let created = service
        .init_monthly_schedule(" Anya ", date(2024, 2, 6))
        .unwrap();

    let dates: Vec<_> = created.iter().map(|r| r.visit_date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 6),
            date(2024, 2, 13),
            date(2024, 2, 20),
            date(2024, 2, 27)
        ]
    );
    assert!(created.iter().all(|r| r.id.is_some() && !r.attended));
    assert!(created.iter().all(|r| r.person_name == "Anya"));
    assert!(created.iter().all(|r| r.visit_date.weekday() == Weekday::Tue));
}

#[test]
fn multi_month_schedule_runs_through_last_month() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 1, 1));

    // 2024-01-28 is a Sunday.
    let created = service.init_schedule("Boris", date(2024, 1, 28), 3).unwrap();

    assert_eq!(created.first().unwrap().visit_date, date(2024, 1, 28));
    assert_eq!(created.last().unwrap().visit_date, date(2024, 3, 31));
    assert_eq!(created.len(), 10);
}

#[test]
fn schedule_rejects_closed_weekday() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 1));

    // 2024-02-05 is a Monday.
    let err = service
        .init_monthly_schedule("Anya", date(2024, 2, 5))
        .unwrap_err();
    assert!(matches!(err, ServiceError::DisallowedWeekday(d) if d == date(2024, 2, 5)));
}

#[test]
fn month_outlook_lists_persons_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 10));
    seed(&service);

    let outlook = service.month_outlook(2024, 2, None).unwrap();

    assert_eq!(outlook.lessons_total, 4);
    let names: Vec<_> = outlook.persons.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anya", "Boris"]);
    assert_eq!(outlook.persons[0].dates_missed, vec![date(2024, 2, 22)]);
    assert!(outlook.persons[1].dates_attended.is_empty());
}

#[test]
fn saved_and_scheduled_names_merge_after_trim() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, date(2024, 2, 1));

    let saved = service
        .save_attendance(&AttendanceRecord::new(" Anya ", date(2024, 2, 4)))
        .unwrap()
        .unwrap();
    assert_eq!(saved.person_name, "Anya");

    service.init_monthly_schedule("Anya", date(2024, 2, 6)).unwrap();

    let outlook = service.month_outlook(2024, 2, None).unwrap();
    let names: Vec<_> = outlook.persons.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anya"]);
    assert_eq!(outlook.persons[0].dates_missed.len(), 5);
}

//! Attendance repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide date-range reads and id-based CRUD over `attendance_records`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `AttendanceRecord::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Range reads are inclusive and ordered by `visit_date ASC, id ASC`.

use crate::db::DbError;
use crate::model::record::{AttendanceRecord, RecordId, RecordValidationError};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    person_name,
    visit_date,
    attended
FROM attendance_records";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for attendance persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    /// Store transport failure; fatal to the current request.
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted attendance data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store operations consumed by attendance services.
pub trait AttendanceRepository {
    /// Records with `start <= visit_date <= end`, ordered by date then id.
    fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate)
        -> RepoResult<Vec<AttendanceRecord>>;
    /// Records of a single day, ordered by id.
    fn find_by_visit_date(&self, date: NaiveDate) -> RepoResult<Vec<AttendanceRecord>>;
    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<AttendanceRecord>>;
    /// Inserts when `record.id` is `None`, otherwise replaces the stored row.
    ///
    /// Returns the persisted copy with its id set. Saving a record whose id
    /// no longer exists inserts nothing and returns `Ok(None)`.
    fn save(&self, record: &AttendanceRecord) -> RepoResult<Option<AttendanceRecord>>;
    /// Returns whether a row was removed; absent ids are a no-op.
    fn delete_by_id(&self, id: RecordId) -> RepoResult<bool>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, record: &AttendanceRecord) -> RepoResult<AttendanceRecord> {
        self.conn.execute(
            "INSERT INTO attendance_records (
                person_name,
                visit_date,
                attended
            ) VALUES (?1, ?2, ?3);",
            params![
                record.person_name.as_str(),
                date_to_db(record.visit_date),
                bool_to_int(record.attended),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=record_insert module=repo status=ok record_id={id}");
        Ok(record.clone().with_id(id))
    }

    fn update(&self, id: RecordId, record: &AttendanceRecord) -> RepoResult<Option<AttendanceRecord>> {
        let changed = self.conn.execute(
            "UPDATE attendance_records
             SET
                person_name = ?1,
                visit_date = ?2,
                attended = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                record.person_name.as_str(),
                date_to_db(record.visit_date),
                bool_to_int(record.attended),
                id,
            ],
        )?;

        if changed == 0 {
            debug!("event=record_update module=repo status=missing record_id={id}");
            return Ok(None);
        }

        debug!("event=record_update module=repo status=ok record_id={id}");
        Ok(Some(record.clone()))
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.query_records(
            &format!(
                "{RECORD_SELECT_SQL}
                 WHERE visit_date >= ?1 AND visit_date <= ?2
                 ORDER BY visit_date ASC, id ASC;"
            ),
            params![date_to_db(start), date_to_db(end)],
        )
    }

    fn find_by_visit_date(&self, date: NaiveDate) -> RepoResult<Vec<AttendanceRecord>> {
        self.query_records(
            &format!("{RECORD_SELECT_SQL} WHERE visit_date = ?1 ORDER BY id ASC;"),
            params![date_to_db(date)],
        )
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<AttendanceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, record: &AttendanceRecord) -> RepoResult<Option<AttendanceRecord>> {
        record.validate()?;

        match record.id {
            None => self.insert(record).map(Some),
            Some(id) => self.update(id, record),
        }
    }

    fn delete_by_id(&self, id: RecordId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM attendance_records WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let id: RecordId = row.get("id")?;

    let date_text: String = row.get("visit_date")?;
    let visit_date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in attendance_records.visit_date"
        ))
    })?;

    let attended = match row.get::<_, i64>("attended")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid attended value `{other}` in attendance_records.attended"
            )));
        }
    };

    let record = AttendanceRecord {
        id: Some(id),
        person_name: row.get("person_name")?,
        visit_date,
        attended,
    };
    record.validate()?;
    Ok(record)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

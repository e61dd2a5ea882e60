//! Attendance record domain model.
//!
//! # Responsibility
//! - Define the canonical dated attendance entry for one person.
//! - Validate record shape before persistence and after read-back.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one, then never changes.
//! - `person_name` is never blank.
//! - `visit_date` carries no time component.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of an attendance record.
pub type RecordId = i64;

/// Validation errors for attendance record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Person name is empty or whitespace only.
    EmptyPersonName,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPersonName => write!(f, "person name must not be blank"),
        }
    }
}

impl Error for RecordValidationError {}

/// One scheduled visit of one person on one calendar day.
///
/// Values are passed around as immutable snapshots; changing the attended
/// flag produces a new copy that is written back through the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// `None` for records not yet persisted.
    pub id: Option<RecordId>,
    pub person_name: String,
    pub visit_date: NaiveDate,
    /// Defaults to `false` for freshly scheduled visits.
    #[serde(default)]
    pub attended: bool,
}

impl AttendanceRecord {
    /// Creates an unsaved, not-yet-attended record.
    pub fn new(person_name: impl Into<String>, visit_date: NaiveDate) -> Self {
        Self {
            id: None,
            person_name: person_name.into(),
            visit_date,
            attended: false,
        }
    }

    /// Returns a copy with the given store identifier.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with the attended flag replaced.
    pub fn with_attended(mut self, attended: bool) -> Self {
        self.attended = attended;
        self
    }

    /// Whether the store has assigned an identifier yet.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Validates record shape.
    ///
    /// # Errors
    /// - `EmptyPersonName` when `person_name` is blank after trim.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.person_name.trim().is_empty() {
            return Err(RecordValidationError::EmptyPersonName);
        }
        Ok(())
    }
}

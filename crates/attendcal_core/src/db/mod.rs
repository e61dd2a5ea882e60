//! Attendance store: connection opening and schema upgrades.
//!
//! Every connection handed out by [`open_db`] or [`open_db_in_memory`] is
//! already on the latest schema; repositories never see a half-migrated file.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to reach or prepare the attendance store.
///
/// Callers treat any variant as "store unavailable" for the current request.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected an open, pragma or statement.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build than this one.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "store unavailable: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store unavailable: attendance schema v{found} requires a newer build (this build supports up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

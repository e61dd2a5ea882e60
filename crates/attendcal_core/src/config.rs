//! Business constants and runtime configuration.
//!
//! # Responsibility
//! - Hold the fixed billing policy (per-visit rate, flat tax).
//! - Resolve database path and logging settings from the environment.
//!
//! # Invariants
//! - Money is counted in integral currency minor units.
//! - Missing environment values fall back to defaults, never to errors.

use crate::logging::default_log_level;
use chrono::Weekday;
use std::path::PathBuf;

/// Amount earned for one attended visit.
pub const COST_PER_ATTENDANCE: i64 = 1_250;

/// Flat amount subtracted from expected gross revenue.
pub const TAX_AMOUNT: i64 = 6_500;

/// Weekdays on which visits may be scheduled.
pub const ALLOWED_WEEKDAYS: [Weekday; 4] =
    [Weekday::Tue, Weekday::Thu, Weekday::Fri, Weekday::Sun];

pub const ENV_DB_PATH: &str = "ATTENDCAL_DB_PATH";
pub const ENV_LOG_DIR: &str = "ATTENDCAL_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "ATTENDCAL_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "attendcal.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "attendcal-logs";

/// Whether `weekday` is open for scheduling.
pub fn is_allowed_weekday(weekday: Weekday) -> bool {
    ALLOWED_WEEKDAYS.contains(&weekday)
}

/// Runtime settings for hosts embedding the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Must be absolute; see `logging::init_logging`.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: value(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_dir: value(ENV_LOG_DIR).map_or(defaults.log_dir, PathBuf::from),
            log_level: value(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        }
    }
}

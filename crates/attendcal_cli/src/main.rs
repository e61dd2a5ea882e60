//! Command-line front end for the attendance calendar.
//!
//! # Responsibility
//! - Map subcommands onto `CalendarService` use-cases.
//! - Print every response as pretty JSON on stdout.

use anyhow::{Context, Result};
use attendcal_core::db::open_db;
use attendcal_core::{
    init_logging, logging_status, AppConfig, AttendanceRecord, CalendarService,
    SqliteAttendanceRepository, SystemClock,
};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "attendcal", version, about = "Weekly attendance calendar and revenue reports")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "ATTENDCAL_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "ATTENDCAL_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, env = "ATTENDCAL_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Month grid with totals; defaults to the current month.
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Per-day visit totals between two dates, inclusive.
    Daily {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Monthly financial report.
    Report {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Reference date; defaults to today.
        #[arg(long)]
        pivot: Option<NaiveDate>,
    },
    /// Status counts and per-person upcoming visits.
    Outlook {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        pivot: Option<NaiveDate>,
    },
    /// Adds a single visit.
    Add {
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Adds weekly visits from a start date to the end of its month.
    Schedule {
        #[arg(long)]
        person: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long, default_value_t = 1)]
        months: u32,
    },
    /// Sets the attended flag of a visit.
    Mark {
        id: i64,
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        attended: bool,
    },
    /// Deletes a visit.
    Delete { id: i64 },
}

#[derive(Debug, Serialize)]
struct MutationResponse<T: Serialize> {
    ok: bool,
    result: T,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("attendcal: logging disabled: {err}");
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=cli_logging module=cli status=ok level={level} log_dir={}",
            log_dir.display()
        );
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let service = CalendarService::new(SqliteAttendanceRepository::new(&conn), SystemClock);

    info!("event=cli_command module=cli status=start command={}", command_name(&cli.command));
    match cli.command {
        Command::Calendar { year, month } => print_json(&service.prepare_calendar(year, month)?),
        Command::Daily { start, end } => print_json(&service.daily_summaries(start, end)?),
        Command::Report { year, month, pivot } => {
            print_json(&service.monthly_financial_report(year, month, pivot)?)
        }
        Command::Outlook { year, month, pivot } => {
            print_json(&service.month_outlook(year, month, pivot)?)
        }
        Command::Add { person, date } => {
            let saved = service.save_attendance(&AttendanceRecord::new(person, date))?;
            print_json(&MutationResponse {
                ok: saved.is_some(),
                result: saved,
            })
        }
        Command::Schedule {
            person,
            start,
            months,
        } => print_json(&MutationResponse {
            ok: true,
            result: service.init_schedule(&person, start, months)?,
        }),
        Command::Mark { id, attended } => {
            let updated = service.update_attendance(id, attended)?;
            print_json(&MutationResponse {
                ok: updated.is_some(),
                result: updated,
            })
        }
        Command::Delete { id } => {
            let removed = service.delete_attendance(id)?;
            print_json(&MutationResponse {
                ok: removed,
                result: id,
            })
        }
    }
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let defaults = AppConfig::from_env();
    AppConfig {
        db_path: cli.db.clone().unwrap_or(defaults.db_path),
        log_dir: cli.log_dir.clone().unwrap_or(defaults.log_dir),
        log_level: cli.log_level.clone().unwrap_or(defaults.log_level),
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Calendar { .. } => "calendar",
        Command::Daily { .. } => "daily",
        Command::Report { .. } => "report",
        Command::Outlook { .. } => "outlook",
        Command::Add { .. } => "add",
        Command::Schedule { .. } => "schedule",
        Command::Mark { .. } => "mark",
        Command::Delete { .. } => "delete",
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode response")?;
    println!("{text}");
    Ok(())
}

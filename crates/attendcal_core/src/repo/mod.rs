//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract consumed by attendance services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `AttendanceRecord::validate()` before persistence.
//! - Missing ids are reported as `None`/`false`, never as transport errors.

pub mod attendance_repo;

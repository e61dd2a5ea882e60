//! Attendance-derived reports.
//!
//! # Responsibility
//! - Aggregate records per day and per person.
//! - Compute monthly financial figures split by pivot date.
//!
//! # Invariants
//! - Reports are pure functions of a record snapshot and explicit dates.
//! - All counts and amounts are exact integers.

pub mod aggregate;
pub mod financial;
pub mod outlook;

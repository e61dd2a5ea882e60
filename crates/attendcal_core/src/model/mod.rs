//! Domain model for scheduled visits and month bounds.
//!
//! # Responsibility
//! - Define the value types shared by calendar, report and store layers.
//!
//! # Invariants
//! - Model values are immutable snapshots; only the repository persists them.

pub mod locale;
pub mod month;
pub mod record;

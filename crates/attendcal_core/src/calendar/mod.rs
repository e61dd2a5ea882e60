//! Month calendar projection.
//!
//! # Responsibility
//! - Build the fixed 6x7 grid for a month.
//! - Assemble the calendar view returned to transport layers.
//!
//! # Invariants
//! - Everything here is a pure function of its inputs.

pub mod grid;
pub mod view;

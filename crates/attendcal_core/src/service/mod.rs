//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads into calendar and report builders.
//! - Keep transport layers decoupled from storage details.

pub mod calendar_service;

//! Domain model for roster records.
//!
//! # Responsibility
//! - Define validated data structures used by core business logic.
//!
//! # Invariants
//! - A model value that exists has already passed every field rule.

pub mod employee;

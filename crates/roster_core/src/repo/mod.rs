//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the store.
//! - Isolate backing-file format details from service orchestration.
//!
//! # Invariants
//! - Read paths re-validate every persisted row instead of masking bad data.
//! - Write paths replace the whole backing file; there are no partial updates.

pub mod csv_repo;

//! Repository layer abstractions and agenda implementations.
//!
//! # Responsibility
//! - Define the agenda contract used by services.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Repository writes enforce `Contact::validate()` before persistence.
//! - Absent lookups return `None`; updates of unknown ids return `NotFound`.

pub mod contact_repo;
pub mod memory_repo;
pub mod sqlite_repo;

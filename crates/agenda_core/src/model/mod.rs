//! Contact domain model.
//!
//! # Responsibility
//! - Define the record shape shared by all agenda backends and adapters.
//!
//! # Invariants
//! - Every persisted contact is identified by a non-zero `ContactId`.

pub mod contact;

//! Contact search entry points.
//!
//! # Responsibility
//! - Own text folding and the filter + sort policy.
//! - Keep query semantics identical across in-memory and SQLite backends.

pub mod fold;
pub mod query;

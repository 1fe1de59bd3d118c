//! File persistence for the in-memory agenda.

pub mod json_file;

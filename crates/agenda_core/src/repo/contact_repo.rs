//! Contact repository contract and shared error type.
//!
//! # Responsibility
//! - Define the agenda operations every backend must provide.
//! - Map validation and storage failures into one semantic error.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before mutating state.
//! - Upserting an unpersisted contact assigns a fresh id that is never reused.
//! - Upserting a persisted contact replaces it in place or fails with `NotFound`.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError};
use crate::search::query::ContactQuery;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Agenda operations over contact records.
pub trait ContactRepository {
    /// Inserts a new contact (id `0`) or replaces the one with the same id.
    ///
    /// Returns the assigned or existing id.
    fn upsert_contact(&mut self, contact: &Contact) -> RepoResult<ContactId>;
    /// Removes a contact. Returns `false` when no contact had this id.
    fn delete_contact(&mut self, id: ContactId) -> RepoResult<bool>;
    /// Point lookup by id.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Filtered contacts sorted by `(apellido, nombre)`.
    fn query_contacts(&self, query: &ContactQuery) -> RepoResult<Vec<Contact>>;
    /// Number of stored contacts.
    fn count_contacts(&self) -> RepoResult<usize>;
}

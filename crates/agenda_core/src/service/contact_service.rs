//! Contact use-case service.
//!
//! # Responsibility
//! - Turn form input into validated contacts and persist them.
//! - Provide stable lookup/search/delete entry points for adapters.
//!
//! # Invariants
//! - The service owns an explicitly constructed repository; no global state.
//! - Log events carry ids and counts only, never contact field values.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::search::query::ContactQuery;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Form input breaks contact invariants.
    Validation(ContactValidationError),
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back did not return the record.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent agenda state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Contact service facade over a repository implementation.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the underlying repository, consuming the service.
    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Creates or updates a contact from form input and returns the stored record.
    ///
    /// # Contract
    /// - Draft fields are trimmed before validation.
    /// - A draft without id (or id `0`) creates a contact with a fresh id.
    /// - A draft with an unknown id fails with `NotFound` and changes nothing.
    pub fn save(&mut self, draft: ContactDraft) -> ServiceResult<Contact> {
        let contact = draft.into_contact()?;
        let is_new = !contact.is_persisted();
        let id = match self.repo.upsert_contact(&contact) {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "event=contact_save module=service status=error is_new={} error={}",
                    is_new, err
                );
                return Err(err.into());
            }
        };
        info!(
            "event=contact_save module=service status=ok id={} is_new={}",
            id, is_new
        );

        self.repo
            .get_contact(id)?
            .ok_or(ServiceError::InconsistentState(
                "saved contact not found in read-back",
            ))
    }

    /// Deletes one contact. Returns whether a record was removed.
    pub fn remove(&mut self, id: ContactId) -> ServiceResult<bool> {
        let removed = self.repo.delete_contact(id)?;
        info!(
            "event=contact_delete module=service status=ok id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    /// Point lookup by id.
    pub fn find(&self, id: ContactId) -> ServiceResult<Option<Contact>> {
        Ok(self.repo.get_contact(id)?)
    }

    /// Returns contacts matching `text`, sorted by `(apellido, nombre)`.
    pub fn search(&self, text: &str) -> ServiceResult<Vec<Contact>> {
        self.list(&ContactQuery::new(text))
    }

    /// Runs a full query with pagination.
    pub fn list(&self, query: &ContactQuery) -> ServiceResult<Vec<Contact>> {
        let contacts = self.repo.query_contacts(query)?;
        info!(
            "event=contact_query module=service status=ok filtered={} results={}",
            !query.text.trim().is_empty(),
            contacts.len()
        );
        Ok(contacts)
    }

    /// Number of stored contacts.
    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.repo.count_contacts()?)
    }
}

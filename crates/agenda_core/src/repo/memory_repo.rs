//! In-memory agenda.
//!
//! # Responsibility
//! - Own the authoritative ordered list of contacts and the id counter.
//!
//! # Invariants
//! - `next_id` is strictly greater than every stored id.
//! - Insertion order is preserved; updates keep the record position.

use crate::model::contact::{Contact, ContactId, NEW_CONTACT_ID};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use crate::search::query::{run_query, ContactQuery};
use std::collections::HashSet;

const FIRST_CONTACT_ID: ContactId = 1;

/// Vector-backed contact repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryContactRepository {
    contacts: Vec<Contact>,
    next_id: ContactId,
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContactRepository {
    /// Creates an empty agenda whose first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: FIRST_CONTACT_ID,
        }
    }

    /// Rebuilds an agenda from previously persisted parts.
    ///
    /// # Errors
    /// - `Validation` when a stored contact breaks name invariants.
    /// - `InvalidData` when ids are zero, duplicated, or not below `next_id`.
    pub fn from_parts(contacts: Vec<Contact>, next_id: ContactId) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            contact.validate()?;
            if contact.id == NEW_CONTACT_ID {
                return Err(RepoError::InvalidData(
                    "stored contact has unassigned id 0".to_string(),
                ));
            }
            if !seen.insert(contact.id) {
                return Err(RepoError::InvalidData(format!(
                    "duplicate contact id {}",
                    contact.id
                )));
            }
            if contact.id >= next_id {
                return Err(RepoError::InvalidData(format!(
                    "contact id {} is not below next_id {next_id}",
                    contact.id
                )));
            }
        }

        Ok(Self {
            contacts,
            next_id: next_id.max(FIRST_CONTACT_ID),
        })
    }

    /// Contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Id that the next inserted contact will receive.
    pub fn next_id(&self) -> ContactId {
        self.next_id
    }

    fn position_of(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn upsert_contact(&mut self, contact: &Contact) -> RepoResult<ContactId> {
        contact.validate()?;

        if !contact.is_persisted() {
            let id = self.next_id;
            self.next_id = id
                .checked_add(1)
                .ok_or_else(|| RepoError::InvalidData("contact id space exhausted".to_string()))?;
            let mut stored = contact.clone();
            stored.id = id;
            self.contacts.push(stored);
            return Ok(id);
        }

        let index = self
            .position_of(contact.id)
            .ok_or(RepoError::NotFound(contact.id))?;
        self.contacts[index] = contact.clone();
        Ok(contact.id)
    }

    fn delete_contact(&mut self, id: ContactId) -> RepoResult<bool> {
        match self.position_of(id) {
            Some(index) => {
                self.contacts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        Ok(self.position_of(id).map(|index| self.contacts[index].clone()))
    }

    fn query_contacts(&self, query: &ContactQuery) -> RepoResult<Vec<Contact>> {
        Ok(run_query(&self.contacts, query))
    }

    fn count_contacts(&self) -> RepoResult<usize> {
        Ok(self.contacts.len())
    }
}

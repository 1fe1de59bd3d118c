//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record stored by every agenda backend.
//! - Define the form-input shape accepted from presentation adapters.
//!
//! # Invariants
//! - `id` is assigned by a repository and never changes afterwards.
//! - `id == NEW_CONTACT_ID` marks a record that has not been persisted yet.
//! - `nombre` and `apellido` are never blank once validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Repository-assigned contact identifier.
pub type ContactId = u64;

/// Sentinel id for records that were never persisted.
pub const NEW_CONTACT_ID: ContactId = 0;

/// Validation errors for contact invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `nombre` is empty or whitespace only.
    EmptyNombre,
    /// `apellido` is empty or whitespace only.
    EmptyApellido,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNombre => write!(f, "contact nombre cannot be empty"),
            Self::EmptyApellido => write!(f, "contact apellido cannot be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Repository-assigned id, `0` until persisted.
    #[serde(default)]
    pub id: ContactId,
    /// Given name.
    pub nombre: String,
    /// Surname. Primary sort key.
    pub apellido: String,
    /// Opaque phone text, may be empty.
    #[serde(default)]
    pub telefono: String,
    /// Opaque email text, may be empty.
    #[serde(default)]
    pub email: String,
}

impl Contact {
    /// Creates an unpersisted contact with empty phone and email.
    pub fn new(nombre: impl Into<String>, apellido: impl Into<String>) -> Self {
        Self {
            id: NEW_CONTACT_ID,
            nombre: nombre.into(),
            apellido: apellido.into(),
            telefono: String::new(),
            email: String::new(),
        }
    }

    /// Builder-style setter for `telefono`.
    pub fn with_telefono(mut self, telefono: impl Into<String>) -> Self {
        self.telefono = telefono.into();
        self
    }

    /// Builder-style setter for `email`.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Returns whether a repository already assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id != NEW_CONTACT_ID
    }

    /// Validates display-name invariants.
    ///
    /// # Errors
    /// - [`ContactValidationError::EmptyNombre`] when `nombre` is blank.
    /// - [`ContactValidationError::EmptyApellido`] when `apellido` is blank.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.nombre.trim().is_empty() {
            return Err(ContactValidationError::EmptyNombre);
        }
        if self.apellido.trim().is_empty() {
            return Err(ContactValidationError::EmptyApellido);
        }
        Ok(())
    }
}

/// Raw form input coming from a presentation adapter.
///
/// `id` of `None` or `Some(0)` both mean "create a new contact".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email: String,
}

impl ContactDraft {
    /// Converts form input into a validated contact, trimming every field.
    pub fn into_contact(self) -> Result<Contact, ContactValidationError> {
        let contact = Contact {
            id: self.id.unwrap_or(NEW_CONTACT_ID),
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            telefono: self.telefono.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        contact.validate()?;
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactDraft, ContactValidationError, NEW_CONTACT_ID};

    #[test]
    fn draft_trims_fields_and_maps_missing_id_to_new() {
        let draft = ContactDraft {
            id: None,
            nombre: "  Maria ".to_string(),
            apellido: "Gomez\t".to_string(),
            telefono: " 555-0101 ".to_string(),
            email: String::new(),
        };

        let contact = draft.into_contact().expect("draft should be valid");
        assert_eq!(contact.id, NEW_CONTACT_ID);
        assert_eq!(contact.nombre, "Maria");
        assert_eq!(contact.apellido, "Gomez");
        assert_eq!(contact.telefono, "555-0101");
        assert!(!contact.is_persisted());
    }

    #[test]
    fn validate_rejects_blank_names() {
        let err = Contact::new("   ", "Gomez").validate().unwrap_err();
        assert_eq!(err, ContactValidationError::EmptyNombre);

        let err = Contact::new("Maria", "").validate().unwrap_err();
        assert_eq!(err, ContactValidationError::EmptyApellido);
    }
}

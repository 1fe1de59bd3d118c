//! Contact filter + sort query shared by every repository backend.
//!
//! # Responsibility
//! - Decide whether a contact matches a filter text.
//! - Define the canonical `(apellido, nombre)` ordering.
//! - Apply pagination after sorting.
//!
//! # Invariants
//! - Blank filter text matches every contact.
//! - Ordering is total, so equal inputs always produce equal outputs.

use crate::model::contact::Contact;
use crate::search::fold::fold_text;
use std::cmp::Ordering;

/// Query options for listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    /// Free-text filter. Blank means "no filter".
    pub text: String,
    /// Maximum number of results, applied after sorting.
    pub limit: Option<u32>,
    /// Number of sorted results to skip.
    pub offset: u32,
}

impl ContactQuery {
    /// Creates an unpaginated query for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
            offset: 0,
        }
    }

    /// Query matching every contact.
    pub fn all() -> Self {
        Self::default()
    }
}

/// Folded searchable text of a contact: `nombre apellido telefono email`.
pub fn searchable_text(contact: &Contact) -> String {
    fold_text(&format!(
        "{} {} {} {}",
        contact.nombre, contact.apellido, contact.telefono, contact.email
    ))
}

/// Returns whether `contact` matches the already folded `needle`.
pub fn matches_folded(contact: &Contact, needle: &str) -> bool {
    needle.is_empty() || searchable_text(contact).contains(needle)
}

/// Canonical agenda ordering.
///
/// Folded `apellido`, folded `nombre`, then raw values and id as tie-breakers.
pub fn compare_by_name(left: &Contact, right: &Contact) -> Ordering {
    fold_text(&left.apellido)
        .cmp(&fold_text(&right.apellido))
        .then_with(|| fold_text(&left.nombre).cmp(&fold_text(&right.nombre)))
        .then_with(|| left.apellido.cmp(&right.apellido))
        .then_with(|| left.nombre.cmp(&right.nombre))
        .then_with(|| left.id.cmp(&right.id))
}

/// Filters, sorts and paginates `contacts` according to `query`.
pub fn run_query<'a, I>(contacts: I, query: &ContactQuery) -> Vec<Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let needle = fold_text(&query.text);
    let mut matched = contacts
        .into_iter()
        .filter(|contact| matches_folded(contact, &needle))
        .cloned()
        .collect::<Vec<_>>();
    matched.sort_by(compare_by_name);

    let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
    let limit = query
        .limit
        .map_or(usize::MAX, |value| usize::try_from(value).unwrap_or(usize::MAX));

    matched.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::{compare_by_name, run_query, ContactQuery};
    use crate::model::contact::Contact;
    use std::cmp::Ordering;

    fn contact(id: u64, nombre: &str, apellido: &str) -> Contact {
        let mut contact = Contact::new(nombre, apellido);
        contact.id = id;
        contact
    }

    #[test]
    fn ordering_ignores_accents_and_case() {
        let alvarez = contact(1, "Ana", "álvarez");
        let benitez = contact(2, "Ana", "Benitez");
        assert_eq!(compare_by_name(&alvarez, &benitez), Ordering::Less);
    }

    #[test]
    fn ordering_falls_back_to_nombre_then_id() {
        let juan = contact(1, "Juan", "Perez");
        let ana = contact(2, "Ana", "Perez");
        let ana_again = contact(3, "Ana", "Perez");
        assert_eq!(compare_by_name(&ana, &juan), Ordering::Less);
        assert_eq!(compare_by_name(&ana, &ana_again), Ordering::Less);
    }

    #[test]
    fn pagination_applies_after_sorting() {
        let contacts = vec![
            contact(1, "C", "Cc"),
            contact(2, "A", "Aa"),
            contact(3, "B", "Bb"),
        ];
        let query = ContactQuery {
            text: String::new(),
            limit: Some(1),
            offset: 1,
        };

        let page = run_query(&contacts, &query);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 3);
    }
}

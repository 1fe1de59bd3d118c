use agenda_core::{
    fold_text, Contact, ContactQuery, ContactRepository, InMemoryContactRepository,
};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Ana", "ana", "Álvaro", "Gómez", "gomez", "Pérez", "Perez", "Núñez", "Zoe", "Luis",
    ])
    .prop_map(str::to_string)
}

fn contact_strategy() -> impl Strategy<Value = Contact> {
    (name_strategy(), name_strategy(), "[0-9]{0,4}", "[a-z]{0,5}").prop_map(
        |(nombre, apellido, telefono, email)| {
            Contact::new(nombre, apellido)
                .with_telefono(telefono)
                .with_email(email)
        },
    )
}

fn seeded(contacts: &[Contact]) -> (InMemoryContactRepository, Vec<u64>) {
    let mut repo = InMemoryContactRepository::new();
    let ids = contacts
        .iter()
        .map(|contact| repo.upsert_contact(contact).unwrap())
        .collect();
    (repo, ids)
}

proptest! {
    #[test]
    fn inserted_ids_are_strictly_increasing(contacts in prop::collection::vec(contact_strategy(), 0..24)) {
        let (_, ids) = seeded(&contacts);
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn upsert_existing_keeps_length(
        contacts in prop::collection::vec(contact_strategy(), 1..16),
        replacement in contact_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let (mut repo, ids) = seeded(&contacts);
        let target = ids[pick.index(ids.len())];
        let mut edited = replacement;
        edited.id = target;

        repo.upsert_contact(&edited).unwrap();

        prop_assert_eq!(repo.count_contacts().unwrap(), contacts.len());
        prop_assert_eq!(repo.get_contact(target).unwrap(), Some(edited));
    }

    #[test]
    fn delete_then_get_is_absent(
        contacts in prop::collection::vec(contact_strategy(), 1..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let (mut repo, ids) = seeded(&contacts);
        let target = ids[pick.index(ids.len())];

        prop_assert!(repo.delete_contact(target).unwrap());
        prop_assert!(repo.get_contact(target).unwrap().is_none());
    }

    #[test]
    fn empty_query_returns_everything_sorted(contacts in prop::collection::vec(contact_strategy(), 0..24)) {
        let (repo, _) = seeded(&contacts);
        let all = repo.query_contacts(&ContactQuery::all()).unwrap();

        prop_assert_eq!(all.len(), contacts.len());
        let keys = all
            .iter()
            .map(|c| (fold_text(&c.apellido), fold_text(&c.nombre)))
            .collect::<Vec<_>>();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn query_only_returns_records_with_a_matching_field(
        contacts in prop::collection::vec(contact_strategy(), 0..24),
        needle in "[a-zA-Z0-9]{1,3}",
    ) {
        let (repo, _) = seeded(&contacts);
        let folded = fold_text(&needle);
        let result = repo.query_contacts(&ContactQuery::new(needle.clone())).unwrap();

        for contact in &result {
            let fields = [&contact.nombre, &contact.apellido, &contact.telefono, &contact.email];
            prop_assert!(fields.iter().any(|field| fold_text(field).contains(&folded)));
        }
        let expected = contacts
            .iter()
            .filter(|c| {
                [&c.nombre, &c.apellido, &c.telefono, &c.email]
                    .iter()
                    .any(|field| fold_text(field).contains(&folded))
            })
            .count();
        prop_assert_eq!(result.len(), expected);
    }

    #[test]
    fn upsert_then_get_roundtrip(contact in contact_strategy()) {
        let mut repo = InMemoryContactRepository::new();
        let id = repo.upsert_contact(&contact).unwrap();

        let mut expected = contact;
        expected.id = id;
        prop_assert_eq!(repo.get_contact(id).unwrap(), Some(expected));
    }
}

use agenda_core::db::open_db_in_memory;
use agenda_core::{
    ContactDraft, ContactQuery, ContactService, ContactValidationError, InMemoryContactRepository,
    ServiceError, SqliteContactRepository,
};

fn draft(nombre: &str, apellido: &str) -> ContactDraft {
    ContactDraft {
        nombre: nombre.to_string(),
        apellido: apellido.to_string(),
        ..ContactDraft::default()
    }
}

#[test]
fn save_creates_trimmed_contact_with_assigned_id() {
    let mut service = ContactService::new(InMemoryContactRepository::new());

    let saved = service.save(draft("  Maria ", " Gomez")).unwrap();

    assert_eq!(saved.id, 1);
    assert_eq!(saved.nombre, "Maria");
    assert_eq!(saved.apellido, "Gomez");
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn save_with_existing_id_updates_in_place() {
    let mut service = ContactService::new(InMemoryContactRepository::new());
    let created = service.save(draft("Maria", "Gomez")).unwrap();

    let updated = service
        .save(ContactDraft {
            id: Some(created.id),
            telefono: "555-0101".to_string(),
            ..draft("Maria", "Gomez")
        })
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.telefono, "555-0101");
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn save_with_unknown_id_maps_to_not_found() {
    let mut service = ContactService::new(InMemoryContactRepository::new());

    let err = service
        .save(ContactDraft {
            id: Some(9),
            ..draft("Maria", "Gomez")
        })
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(9)));
}

#[test]
fn save_rejects_blank_nombre() {
    let mut service = ContactService::new(InMemoryContactRepository::new());

    let err = service.save(draft("   ", "Gomez")).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ContactValidationError::EmptyNombre)
    ));
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn remove_and_find_follow_repository_semantics() {
    let mut service = ContactService::new(InMemoryContactRepository::new());
    let saved = service.save(draft("Maria", "Gomez")).unwrap();

    assert!(service.remove(saved.id).unwrap());
    assert!(!service.remove(saved.id).unwrap());
    assert!(service.find(saved.id).unwrap().is_none());
}

#[test]
fn search_filters_and_sorts() {
    let mut service = ContactService::new(InMemoryContactRepository::new());
    service.save(draft("Juan", "Perez")).unwrap();
    service.save(draft("Maria", "Gomez")).unwrap();
    service.save(draft("Ana", "Pereira")).unwrap();

    let result = service.search("pere").unwrap();

    let apellidos = result.iter().map(|c| c.apellido.as_str()).collect::<Vec<_>>();
    assert_eq!(apellidos, vec!["Pereira", "Perez"]);
}

#[test]
fn list_supports_pagination() {
    let mut service = ContactService::new(InMemoryContactRepository::new());
    for (nombre, apellido) in [("A", "Aa"), ("B", "Bb"), ("C", "Cc"), ("D", "Dd")] {
        service.save(draft(nombre, apellido)).unwrap();
    }

    let page = service
        .list(&ContactQuery {
            text: String::new(),
            limit: Some(2),
            offset: 1,
        })
        .unwrap();

    let apellidos = page.iter().map(|c| c.apellido.as_str()).collect::<Vec<_>>();
    assert_eq!(apellidos, vec!["Bb", "Cc"]);
}

#[test]
fn service_works_over_sqlite_repository() {
    let conn = open_db_in_memory().unwrap();
    let mut service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let saved = service.save(draft("Maria", "Gomez")).unwrap();
    let found = service.find(saved.id).unwrap().unwrap();

    assert_eq!(found, saved);
}

#[test]
fn into_repository_returns_injected_instance() {
    let mut service = ContactService::new(InMemoryContactRepository::new());
    service.save(draft("Maria", "Gomez")).unwrap();

    let repo = service.into_repository();

    assert_eq!(repo.contacts().len(), 1);
}

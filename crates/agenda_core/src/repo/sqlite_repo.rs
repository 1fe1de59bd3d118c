//! SQLite-backed agenda.
//!
//! # Responsibility
//! - Provide the agenda contract over the `contacts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT`, so deleted ids are never handed out again.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Query ordering matches the in-memory agenda exactly.

use crate::db::migrations::{current_version, latest_version};
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use crate::search::query::{run_query, ContactQuery};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    nombre,
    apellido,
    telefono,
    email
FROM contacts";

const REQUIRED_CONTACT_COLUMNS: &[&str] = &["id", "nombre", "apellido", "telefono", "email"];

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a connection returned by `open_db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn upsert_contact(&mut self, contact: &Contact) -> RepoResult<ContactId> {
        contact.validate()?;

        if !contact.is_persisted() {
            self.conn.execute(
                "INSERT INTO contacts (nombre, apellido, telefono, email)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    contact.nombre.as_str(),
                    contact.apellido.as_str(),
                    contact.telefono.as_str(),
                    contact.email.as_str(),
                ],
            )?;
            return parse_contact_id(self.conn.last_insert_rowid());
        }

        let Some(db_id) = id_to_db(contact.id) else {
            return Err(RepoError::NotFound(contact.id));
        };
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                nombre = ?1,
                apellido = ?2,
                telefono = ?3,
                email = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                contact.nombre.as_str(),
                contact.apellido.as_str(),
                contact.telefono.as_str(),
                contact.email.as_str(),
                db_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(contact.id));
        }

        Ok(contact.id)
    }

    fn delete_contact(&mut self, id: ContactId) -> RepoResult<bool> {
        let Some(db_id) = id_to_db(id) else {
            return Ok(false);
        };
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [db_id])?;
        Ok(changed > 0)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let Some(db_id) = id_to_db(id) else {
            return Ok(None);
        };
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([db_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn query_contacts(&self, query: &ContactQuery) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(run_query(&contacts, query))
    }

    fn count_contacts(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid contact count `{count}`")))
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'contacts';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('contacts');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for required in REQUIRED_CONTACT_COLUMNS {
        if !columns.iter().any(|column| column == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: "contacts",
                column: *required,
            });
        }
    }

    Ok(())
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let contact = Contact {
        id: parse_contact_id(row.get("id")?)?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        telefono: row.get("telefono")?,
        email: row.get("email")?,
    };
    contact.validate()?;
    Ok(contact)
}

fn parse_contact_id(value: i64) -> RepoResult<ContactId> {
    match ContactId::try_from(value) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RepoError::InvalidData(format!(
            "invalid id value `{value}` in contacts.id"
        ))),
    }
}

fn id_to_db(id: ContactId) -> Option<i64> {
    i64::try_from(id).ok().filter(|value| *value > 0)
}

//! JSON snapshot persistence for the in-memory agenda.
//!
//! # Responsibility
//! - Save the whole agenda (contacts + id counter) to one JSON file.
//! - Load it back, rejecting snapshots that break agenda invariants.
//!
//! # Invariants
//! - A missing file loads as an empty agenda.
//! - Saves go through a sibling temp file and a rename, so readers never
//!   observe a half-written snapshot.
//! - Snapshot contents are never logged, only counts and paths.

use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::RepoError;
use crate::repo::memory_repo::InMemoryContactRepository;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot file error.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidSnapshot {
        path: PathBuf,
        source: RepoError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "agenda file `{}` i/o failed: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "agenda file `{}` is not valid JSON: {source}", path.display())
            }
            Self::InvalidSnapshot { path, source } => {
                write!(f, "agenda file `{}` is inconsistent: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidSnapshot { source, .. } => Some(source),
        }
    }
}

/// On-disk snapshot shape.
#[derive(Debug, Serialize, Deserialize)]
struct AgendaSnapshot {
    next_id: ContactId,
    contacts: Vec<Contact>,
}

/// Loads an agenda snapshot, or an empty agenda when `path` does not exist.
pub fn load_agenda(path: impl AsRef<Path>) -> StoreResult<InMemoryContactRepository> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("event=agenda_load module=store status=ok source=empty");
            return Ok(InMemoryContactRepository::new());
        }
        Err(err) => {
            error!(
                "event=agenda_load module=store status=error error_code=read_failed path={}",
                path.display()
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let snapshot: AgendaSnapshot =
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let agenda = InMemoryContactRepository::from_parts(snapshot.contacts, snapshot.next_id)
        .map_err(|source| StoreError::InvalidSnapshot {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "event=agenda_load module=store status=ok source=file contacts={} duration_ms={}",
        agenda.contacts().len(),
        started_at.elapsed().as_millis()
    );
    Ok(agenda)
}

/// Writes `agenda` to `path` as pretty-printed JSON.
pub fn save_agenda(path: impl AsRef<Path>, agenda: &InMemoryContactRepository) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let snapshot = AgendaSnapshot {
        next_id: agenda.next_id(),
        contacts: agenda.contacts().to_vec(),
    };
    let body = serde_json::to_string_pretty(&snapshot).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = temp_path_for(path);
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Err(err) = fs::write(&tmp_path, body).and_then(|()| fs::rename(&tmp_path, path)) {
        error!(
            "event=agenda_save module=store status=error error_code=write_failed path={}",
            path.display()
        );
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(err));
    }

    info!(
        "event=agenda_save module=store status=ok contacts={} duration_ms={}",
        snapshot.contacts.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "agenda.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::temp_path_for;
    use std::path::Path;

    #[test]
    fn temp_path_is_a_sibling() {
        let tmp = temp_path_for(Path::new("/data/agenda.json"));
        assert_eq!(tmp, Path::new("/data/agenda.json.tmp"));
    }
}

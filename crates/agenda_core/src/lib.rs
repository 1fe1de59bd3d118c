//! Core domain logic for the contact agenda.
//! This crate is the single source of truth for agenda invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{AgendaConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    Contact, ContactDraft, ContactId, ContactValidationError, NEW_CONTACT_ID,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryContactRepository;
pub use repo::sqlite_repo::SqliteContactRepository;
pub use search::fold::fold_text;
pub use search::query::ContactQuery;
pub use service::contact_service::{ContactService, ServiceError, ServiceResult};
pub use store::json_file::{load_agenda, save_agenda, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

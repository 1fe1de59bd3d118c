//! Console adapter for the contact agenda.
//!
//! # Responsibility
//! - Parse subcommands and forward them to `ContactService`.
//! - Print results as aligned text or JSON.
//!
//! # Invariants
//! - No agenda decision logic lives here.

use agenda_core::db::open_db;
use agenda_core::{
    init_logging, AgendaConfig, Contact, ContactDraft, ContactId, ContactQuery, ContactService,
    ServiceError, SqliteContactRepository,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "agenda", version = agenda_core::core_version(), about = "Contact agenda")]
struct Cli {
    /// SQLite agenda file. Overrides AGENDA_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute log directory. Overrides AGENDA_LOG_DIR.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level. Overrides AGENDA_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new contact.
    Add(ContactFields),
    /// Edit an existing contact; omitted fields keep their value.
    Edit {
        id: ContactId,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a contact by id.
    Delete { id: ContactId },
    /// Show one contact by id.
    Show { id: ContactId },
    /// List contacts sorted by surname, optionally filtered.
    List {
        filter: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

#[derive(Debug, Args)]
struct ContactFields {
    #[arg(long)]
    nombre: String,
    #[arg(long)]
    apellido: String,
    #[arg(long, default_value = "")]
    telefono: String,
    #[arg(long, default_value = "")]
    email: String,
}

#[derive(Debug, Args)]
struct EditFields {
    #[arg(long)]
    nombre: Option<String>,
    #[arg(long)]
    apellido: Option<String>,
    #[arg(long)]
    telefono: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut cfg = AgendaConfig::from_env()?;
    if let Some(db) = cli.db {
        cfg.db_path = db;
    }
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        cfg.log_dir = Some(dir);
    }
    if let Some(dir) = cfg.log_dir.as_ref() {
        init_logging(&cfg.log_level, dir)?;
    }

    let conn = open_db(&cfg.db_path)?;
    let mut service = ContactService::new(SqliteContactRepository::try_new(&conn)?);
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Add(fields) => {
            let saved = service.save(ContactDraft {
                id: None,
                nombre: fields.nombre,
                apellido: fields.apellido,
                telefono: fields.telefono,
                email: fields.email,
            })?;
            print_contacts(&[saved], cli.json)?;
        }
        Command::Edit { id, fields } => {
            let current = service.find(id)?.ok_or(ServiceError::NotFound(id))?;
            let saved = service.save(ContactDraft {
                id: Some(id),
                nombre: fields.nombre.unwrap_or(current.nombre),
                apellido: fields.apellido.unwrap_or(current.apellido),
                telefono: fields.telefono.unwrap_or(current.telefono),
                email: fields.email.unwrap_or(current.email),
            })?;
            print_contacts(&[saved], cli.json)?;
        }
        Command::Delete { id } => {
            if service.remove(id)? {
                println!("deleted contact {id}");
            } else {
                println!("no contact with id {id}");
            }
        }
        Command::Show { id } => {
            let contact = service.find(id)?.ok_or(ServiceError::NotFound(id))?;
            print_contacts(&[contact], cli.json)?;
        }
        Command::List {
            filter,
            limit,
            offset,
        } => {
            let query = ContactQuery {
                text: filter.unwrap_or_default(),
                limit,
                offset,
            };
            let contacts = service.list(&query)?;
            print_contacts(&contacts, cli.json)?;
        }
    }

    Ok(())
}

fn print_contacts(contacts: &[Contact], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(contacts)?);
        return Ok(());
    }

    for contact in contacts {
        println!(
            "{:>5}  {}, {}  {}  {}",
            contact.id, contact.apellido, contact.nombre, contact.telefono, contact.email
        );
    }
    Ok(())
}

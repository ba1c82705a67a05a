//! Storage for the file shared by the configuration app and the widget.
//!
//! # Responsibility
//! - Open connections to the shared SQLite file.
//! - Create and check the `shared_settings` table before first use.
//!
//! # Invariants
//! - No setting is read or written through a connection whose schema check
//!   failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to reach a usable shared settings file.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build of the app group.
    SchemaTooNew { found: u32, supported: u32 },
    /// `shared_settings` exists but does not have the expected layout.
    SchemaMismatch(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "shared store unavailable: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "shared store was written by a newer build (schema {found}, this build reads {supported})"
            ),
            Self::SchemaMismatch(detail) => write!(f, "shared store layout mismatch: {detail}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaMismatch(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

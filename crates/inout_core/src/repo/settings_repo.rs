//! Namespaced key-value settings over SQLite.
//!
//! # Responsibility
//! - Read and write single numeric settings under an app-group namespace.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Presence is row existence; no value is reserved as an "absent" marker.
//! - Writes are single-row upserts, so readers see either the old or the new
//!   value, never a partial one.
//! - Non-finite values are rejected on write.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Settings persistence error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
    InvalidValue { key: String, value: f64 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(message) => write!(f, "invalid settings key: {message}"),
            Self::InvalidValue { key, value } => {
                write!(f, "setting `{key}` cannot store non-finite value {value}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::InvalidValue { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for namespaced numeric settings.
pub trait SettingsRepository {
    fn get_real(&self, namespace: &str, key: &str) -> RepoResult<Option<f64>>;
    fn set_real(&self, namespace: &str, key: &str, value: f64) -> RepoResult<()>;
    /// Removes a setting; returns whether a row existed.
    fn remove(&self, namespace: &str, key: &str) -> RepoResult<bool>;
}

impl<R: SettingsRepository + ?Sized> SettingsRepository for &R {
    fn get_real(&self, namespace: &str, key: &str) -> RepoResult<Option<f64>> {
        (**self).get_real(namespace, key)
    }

    fn set_real(&self, namespace: &str, key: &str, value: f64) -> RepoResult<()> {
        (**self).set_real(namespace, key, value)
    }

    fn remove(&self, namespace: &str, key: &str) -> RepoResult<bool> {
        (**self).remove(namespace, key)
    }
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_real(&self, namespace: &str, key: &str) -> RepoResult<Option<f64>> {
        validate_key(namespace, key)?;

        let value = self
            .conn
            .query_row(
                "SELECT value FROM shared_settings WHERE namespace = ?1 AND key = ?2;",
                params![namespace, key],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_real(&self, namespace: &str, key: &str, value: f64) -> RepoResult<()> {
        validate_key(namespace, key)?;
        if !value.is_finite() {
            return Err(RepoError::InvalidValue {
                key: key.to_string(),
                value,
            });
        }

        self.conn.execute(
            "INSERT INTO shared_settings (namespace, key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace, key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace, key, value],
        )?;
        Ok(())
    }

    fn remove(&self, namespace: &str, key: &str) -> RepoResult<bool> {
        validate_key(namespace, key)?;

        let changed = self.conn.execute(
            "DELETE FROM shared_settings WHERE namespace = ?1 AND key = ?2;",
            params![namespace, key],
        )?;
        Ok(changed > 0)
    }
}

fn validate_key(namespace: &str, key: &str) -> RepoResult<()> {
    if namespace.trim().is_empty() {
        return Err(RepoError::InvalidKey("namespace cannot be empty".to_string()));
    }
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey("key cannot be empty".to_string()));
    }
    Ok(())
}

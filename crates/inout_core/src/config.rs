//! Shared-storage configuration.
//!
//! # Responsibility
//! - Name the app-group namespace and storage file both processes agree on.
//! - Resolve overrides from the environment for development builds.
//!
//! # Invariants
//! - Empty or whitespace-only overrides are treated as unset.

use std::path::PathBuf;

/// App-group identifier shared by the configuration app and the widget.
pub const DEFAULT_APP_GROUP_ID: &str = "group.com.example.InOutWidget";
/// Settings key holding the configured cycle start date.
pub const CYCLE_START_DATE_KEY: &str = "cycleStartDate";
/// File name used when no storage path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "inout_shared.sqlite3";

pub const APP_GROUP_ID_ENV: &str = "INOUT_APP_GROUP_ID";
pub const DB_PATH_ENV: &str = "INOUT_DB_PATH";

/// Where the shared start date lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppGroupConfig {
    pub app_group_id: String,
    pub db_path: PathBuf,
}

impl Default for AppGroupConfig {
    fn default() -> Self {
        Self {
            app_group_id: DEFAULT_APP_GROUP_ID.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        }
    }
}

impl AppGroupConfig {
    /// Builds a config from `INOUT_APP_GROUP_ID` and `INOUT_DB_PATH`,
    /// falling back to defaults for unset values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let app_group_id = non_empty(lookup(APP_GROUP_ID_ENV)).unwrap_or(defaults.app_group_id);
        let db_path = non_empty(lookup(DB_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        Self {
            app_group_id,
            db_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

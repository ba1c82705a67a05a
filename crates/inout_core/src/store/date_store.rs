//! Start date persistence over the settings repository.
//!
//! # Responsibility
//! - Encode the start date as epoch seconds under `cycleStartDate`.
//! - Decode it back to a calendar date in the observer's time zone.
//!
//! # Invariants
//! - Last write wins; there is no versioning.
//! - Presence is decided by the stored row, so an encoded value of exactly
//!   `0.0` (1970-01-01 at UTC midnight) is a real date.
//! - `load_start_date` never fails; faults are logged and read as `None`.

use crate::config::CYCLE_START_DATE_KEY;
use crate::model::start_date::CycleStartDate;
use crate::repo::settings_repo::{RepoError, SettingsRepository};
use chrono::{Local, TimeZone};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    /// The date has no start-of-day instant in the store's time zone.
    DateOutOfRange(CycleStartDate),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::DateOutOfRange(date) => {
                write!(f, "start date {date} cannot be encoded as a timestamp")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::DateOutOfRange(_) => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Start date store bound to one app-group namespace and one time zone.
pub struct SharedDateStore<R, Tz: TimeZone = Local> {
    repo: R,
    namespace: String,
    tz: Tz,
}

impl<R: SettingsRepository> SharedDateStore<R, Local> {
    /// Creates a store that interprets dates in the system's local zone.
    pub fn new(repo: R, namespace: impl Into<String>) -> Self {
        Self::with_time_zone(repo, namespace, Local)
    }
}

impl<R: SettingsRepository, Tz: TimeZone> SharedDateStore<R, Tz> {
    pub fn with_time_zone(repo: R, namespace: impl Into<String>, tz: Tz) -> Self {
        Self {
            repo,
            namespace: namespace.into(),
            tz,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Saves `date` as the cycle start, overwriting any previous value.
    ///
    /// # Errors
    /// - `DateOutOfRange` when the date has no start-of-day instant.
    /// - `Repo` when the underlying write fails.
    pub fn save_start_date(&self, date: impl Into<CycleStartDate>) -> StoreResult<()> {
        let date = date.into();
        let seconds = date
            .to_epoch_seconds(&self.tz)
            .ok_or(StoreError::DateOutOfRange(date))?;

        self.repo
            .set_real(&self.namespace, CYCLE_START_DATE_KEY, seconds)
            .inspect_err(|err| {
                warn!(
                    "event=start_date_save module=store status=error namespace={} error={}",
                    self.namespace, err
                );
            })?;

        info!(
            "event=start_date_save module=store status=ok namespace={}",
            self.namespace
        );
        Ok(())
    }

    /// Loads the configured start date, or `None` when absent or unreadable.
    pub fn load_start_date(&self) -> Option<CycleStartDate> {
        match self.try_load_start_date() {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=start_date_load module=store status=degraded namespace={} error={}",
                    self.namespace, err
                );
                None
            }
        }
    }

    /// Loads the configured start date, surfacing storage faults.
    ///
    /// Stored values that cannot be decoded into a date read as `None`.
    pub fn try_load_start_date(&self) -> StoreResult<Option<CycleStartDate>> {
        let Some(seconds) = self.repo.get_real(&self.namespace, CYCLE_START_DATE_KEY)? else {
            debug!(
                "event=start_date_load module=store status=absent namespace={}",
                self.namespace
            );
            return Ok(None);
        };

        let decoded = CycleStartDate::from_epoch_seconds(seconds, &self.tz);
        if decoded.is_none() {
            warn!(
                "event=start_date_load module=store status=invalid namespace={}",
                self.namespace
            );
            debug!(
                "event=start_date_load module=store status=invalid namespace={} value={}",
                self.namespace, seconds
            );
        }
        Ok(decoded)
    }

    /// Removes the configured start date; returns whether one was stored.
    pub fn clear_start_date(&self) -> StoreResult<bool> {
        let removed = self.repo.remove(&self.namespace, CYCLE_START_DATE_KEY)?;
        info!(
            "event=start_date_clear module=store status=ok namespace={} removed={}",
            self.namespace, removed
        );
        Ok(removed)
    }
}

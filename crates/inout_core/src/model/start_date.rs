//! Cycle start date model.
//!
//! # Responsibility
//! - Represent day 0 of the OUT phase as a time-zone-naive calendar date.
//! - Convert between calendar dates and the persisted epoch-seconds value.
//!
//! # Invariants
//! - The wrapped date never carries a time of day.
//! - The persisted value is the start-of-day instant in the observer's zone.
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Day 0 of the OUT phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleStartDate(NaiveDate);

impl CycleStartDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Normalizes an instant to its calendar date in the instant's own zone.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the first instant of this date in `tz`.
    ///
    /// Zones that skip local midnight (DST gap) resolve to the first valid
    /// hour of the day. Returns `None` only when no hour of the day maps to
    /// an instant, which happens at the edges of the representable range.
    pub fn start_of_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        (0..24).find_map(|hour| {
            let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            tz.from_local_datetime(&self.0.and_time(time)).earliest()
        })
    }

    /// Encodes this date as floating-point seconds since the Unix epoch.
    pub fn to_epoch_seconds<Tz: TimeZone>(&self, tz: &Tz) -> Option<f64> {
        let instant = self.start_of_day(tz)?;
        // i64 seconds within chrono's range are exactly representable in f64.
        Some(instant.timestamp() as f64)
    }

    /// Decodes a persisted epoch-seconds value into the calendar date it
    /// falls on in `tz`.
    ///
    /// Returns `None` for non-finite values or instants outside chrono's range.
    pub fn from_epoch_seconds<Tz: TimeZone>(value: f64, tz: &Tz) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let whole = value.floor();
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return None;
        }
        let nanos = ((value - whole) * 1_000_000_000.0).min(999_999_999.0) as u32;
        let utc = DateTime::from_timestamp(whole as i64, nanos)?;
        Some(Self(utc.with_timezone(tz).date_naive()))
    }
}

impl From<NaiveDate> for CycleStartDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for CycleStartDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

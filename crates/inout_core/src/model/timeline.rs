//! Pre-built display states for a rendering surface.
//!
//! # Invariants
//! - Entries are on consecutive calendar dates, oldest first.
//! - `refresh_on` is the day after the last entry.

use crate::model::phase::CyclePhase;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days a rendering surface pre-builds by default.
pub const DEFAULT_TIMELINE_DAYS: u32 = 7;

/// Phase shown from local start-of-day of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub phase: CyclePhase,
}

/// Sequence of future display states plus the date to re-query on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimeline {
    pub entries: Vec<TimelineEntry>,
    pub refresh_on: NaiveDate,
}

impl PhaseTimeline {
    /// Returns the entry in effect on `date`, if the timeline covers it.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }
}

//! Timeline builder for rendering surfaces.
//!
//! # Invariants
//! - At least one entry is always produced.
//! - Entries are consecutive calendar dates starting at `from`.

use crate::calc::phase_calc::compute_phase;
use crate::model::phase::CyclePhase;
use crate::model::start_date::CycleStartDate;
use crate::model::timeline::{PhaseTimeline, TimelineEntry};
use chrono::{Days, NaiveDate};

/// Builds `days` consecutive display states starting at `from`.
///
/// `days == 0` is treated as one day. Dates past the end of chrono's
/// calendar are skipped; if none remain, a single `Unconfigured` entry for
/// `from` is returned so the caller always has something to show.
pub fn build_timeline(start: Option<CycleStartDate>, from: NaiveDate, days: u32) -> PhaseTimeline {
    let mut entries = (0..days.max(1))
        .filter_map(|offset| from.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| TimelineEntry {
            date,
            phase: compute_phase(start, date),
        })
        .collect::<Vec<_>>();

    if entries.is_empty() {
        entries.push(TimelineEntry {
            date: from,
            phase: CyclePhase::Unconfigured,
        });
    }

    let last = entries[entries.len() - 1].date;
    PhaseTimeline {
        entries,
        refresh_on: last.succ_opt().unwrap_or(last),
    }
}

//! Cycle use-case service.
//!
//! # Responsibility
//! - Combine the shared date store and the calculator into the calls made by
//!   the configuration app and the widget renderer.
//! - Keep front ends decoupled from storage and date arithmetic.
//!
//! # Invariants
//! - Every query reloads the start date; the service keeps no session state.
//! - Read-side storage faults surface as `CyclePhase::Unconfigured`.

use crate::calc::phase_calc::{compute_phase, next_transition};
use crate::calc::timeline::build_timeline;
use crate::model::phase::CyclePhase;
use crate::model::start_date::CycleStartDate;
use crate::model::timeline::PhaseTimeline;
use crate::repo::settings_repo::SettingsRepository;
use crate::store::date_store::{SharedDateStore, StoreResult};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Use-case service over a shared date store.
pub struct CycleService<R, Tz: TimeZone = Local> {
    store: SharedDateStore<R, Tz>,
}

impl<R: SettingsRepository, Tz: TimeZone> CycleService<R, Tz> {
    pub fn new(store: SharedDateStore<R, Tz>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedDateStore<R, Tz> {
        &self.store
    }

    /// Returns today's calendar date in the store's time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(self.store.time_zone()).date_naive()
    }

    /// Saves a new start date and returns today's phase under it.
    ///
    /// The caller is expected to ask the rendering surface to refresh after
    /// a successful save.
    pub fn configure(&self, date: impl Into<CycleStartDate>) -> StoreResult<CyclePhase> {
        let date = date.into();
        self.store.save_start_date(date)?;
        Ok(compute_phase(Some(date), self.today()))
    }

    /// Phase on a calendar date.
    pub fn phase_on(&self, date: NaiveDate) -> CyclePhase {
        compute_phase(self.store.load_start_date(), date)
    }

    /// Phase at an instant, using its calendar date in the store's time zone.
    pub fn phase_at<Other: TimeZone>(&self, instant: &DateTime<Other>) -> CyclePhase {
        self.phase_on(instant.with_timezone(self.store.time_zone()).date_naive())
    }

    pub fn current_phase(&self) -> CyclePhase {
        self.phase_on(self.today())
    }

    /// Builds `days` display states starting at `from`.
    pub fn timeline(&self, from: NaiveDate, days: u32) -> PhaseTimeline {
        build_timeline(self.store.load_start_date(), from, days)
    }

    /// First date after `from` on which the phase flips, with its phase.
    pub fn next_transition(&self, from: NaiveDate) -> Option<(NaiveDate, CyclePhase)> {
        next_transition(self.store.load_start_date(), from)
    }
}

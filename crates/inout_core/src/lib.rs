//! Core domain logic for the IN/OUT cycle widget.
//! This crate is the single source of truth for phase calculation and for
//! the start date shared between the configuration app and the widget.

pub mod calc;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use calc::phase_calc::{compute_phase, compute_phase_at, cycle_day, next_transition};
pub use calc::timeline::build_timeline;
pub use config::{AppGroupConfig, CYCLE_START_DATE_KEY, DEFAULT_APP_GROUP_ID};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::phase::{
    CyclePhase, HsbColor, PhaseAccent, CYCLE_LENGTH_DAYS, IN_PHASE_DAYS, OUT_PHASE_DAYS,
};
pub use model::start_date::CycleStartDate;
pub use model::timeline::{PhaseTimeline, TimelineEntry, DEFAULT_TIMELINE_DAYS};
pub use repo::settings_repo::{
    RepoError, RepoResult, SettingsRepository, SqliteSettingsRepository,
};
pub use service::cycle_service::CycleService;
pub use store::date_store::{SharedDateStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! FFI use-case API for the configuration app and the widget extension.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Resolve the shared storage location once per process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Read paths never fail: storage faults surface as the unconfigured phase.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.
//!
//! # See also
//! - docs/architecture/logging.md

use chrono::NaiveDate;
use inout_core::db::open_db;
use inout_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    build_timeline, AppGroupConfig, CycleService, CyclePhase, PhaseAccent, PhaseTimeline,
    SharedDateStore, SqliteSettingsRepository, DEFAULT_TIMELINE_DAYS,
};
use log::warn;
use std::sync::OnceLock;

const TIMELINE_DAYS_MAX: u32 = 31;
const DATE_FORMAT: &str = "%Y-%m-%d";
static APP_GROUP_CONFIG: OnceLock<AppGroupConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Display state for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseView {
    /// Calendar date this state applies to (`YYYY-MM-DD`).
    pub date: String,
    /// Phase kind (`out|in|unconfigured`).
    pub kind: String,
    /// Zero-based day inside the phase; `None` when unconfigured.
    pub day_index: Option<u32>,
    /// Headline text (`OUT`, `IN`, `SET DATE`).
    pub display_text: String,
    /// Secondary line, e.g. `Day 3 of 7`.
    pub subtitle_text: String,
    /// Accent family (`blue|green|gray`).
    pub accent: String,
    /// Fraction of the phase elapsed, `0.0` on its first day and `1.0` on
    /// its last; `None` when unconfigured.
    pub progress: Option<f64>,
    /// Hue of the progress tint, in `[0.0, 1.0]`.
    pub tint_hue: f64,
    /// Saturation of the progress tint, in `[0.0, 1.0]`.
    pub tint_saturation: f64,
    /// Brightness of the progress tint, in `[0.0, 1.0]`.
    pub tint_brightness: f64,
}

/// Display states for consecutive days plus the day to ask again.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    /// One state per day, starting today.
    pub entries: Vec<PhaseView>,
    /// Date (`YYYY-MM-DD`) on which the widget should request a new timeline.
    pub refresh_on: String,
}

/// Generic action response envelope for configuration calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Today's phase after the change, when the operation succeeded.
    pub phase: Option<PhaseView>,
}

impl ActionResponse {
    fn success(message: impl Into<String>, phase: PhaseView) -> Self {
        Self {
            ok: true,
            message: message.into(),
            phase: Some(phase),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            phase: None,
        }
    }
}

/// Saves the cycle start date chosen in the configuration app.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `iso_date` must be `YYYY-MM-DD`.
/// - Never panics; on success the caller should reload the widget timelines.
#[flutter_rust_bridge::frb(sync)]
pub fn set_cycle_start_date(iso_date: String) -> ActionResponse {
    set_cycle_start_date_with(resolve_config(), iso_date.as_str())
}

/// Returns the configured start date as `YYYY-MM-DD`, or `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn get_cycle_start_date() -> Option<String> {
    get_cycle_start_date_with(resolve_config())
}

/// Removes the configured start date.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_cycle_start_date() -> ActionResponse {
    clear_cycle_start_date_with(resolve_config())
}

/// Returns today's display state.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never fails; an unavailable store yields the `unconfigured` state.
#[flutter_rust_bridge::frb(sync)]
pub fn current_phase() -> PhaseView {
    current_phase_with(resolve_config())
}

/// Returns display states for today and the following days.
///
/// `days`: `None` or `0` means the default of 7; values above 31 are capped.
/// The widget should request a new timeline on `refresh_on`.
///
/// # FFI contract
/// - Never fails; an unavailable store yields `days` unconfigured entries.
#[flutter_rust_bridge::frb(sync)]
pub fn phase_timeline(days: Option<u32>) -> TimelineView {
    phase_timeline_with(resolve_config(), days)
}

/// Returns the display state of the next phase change, or `None` when the
/// cycle is not configured.
#[flutter_rust_bridge::frb(sync)]
pub fn next_phase_change() -> Option<PhaseView> {
    next_phase_change_with(resolve_config())
}

fn set_cycle_start_date_with(config: &AppGroupConfig, iso_date: &str) -> ActionResponse {
    let date = match parse_iso_date(iso_date) {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("set_cycle_start_date failed: {err}")),
    };

    let result = with_cycle_service(config, |service| {
        let phase = service.configure(date).map_err(|err| err.to_string())?;
        Ok(to_phase_view(service.today(), phase))
    });
    match result {
        Ok(view) => ActionResponse::success("Start date saved.", view),
        Err(err) => ActionResponse::failure(format!("set_cycle_start_date failed: {err}")),
    }
}

fn get_cycle_start_date_with(config: &AppGroupConfig) -> Option<String> {
    with_cycle_service(config, |service| Ok(service.store().load_start_date()))
        .unwrap_or_else(|err| degraded("get_cycle_start_date", &err, None))
        .map(|date| date.to_string())
}

fn clear_cycle_start_date_with(config: &AppGroupConfig) -> ActionResponse {
    let result = with_cycle_service(config, |service| {
        service
            .store()
            .clear_start_date()
            .map_err(|err| err.to_string())?;
        Ok(to_phase_view(service.today(), service.current_phase()))
    });
    match result {
        Ok(view) => ActionResponse::success("Start date cleared.", view),
        Err(err) => ActionResponse::failure(format!("clear_cycle_start_date failed: {err}")),
    }
}

fn current_phase_with(config: &AppGroupConfig) -> PhaseView {
    with_cycle_service(config, |service| {
        Ok(to_phase_view(service.today(), service.current_phase()))
    })
    .unwrap_or_else(|err| degraded("current_phase", &err, unconfigured_today()))
}

fn phase_timeline_with(config: &AppGroupConfig, days: Option<u32>) -> TimelineView {
    let days = normalize_timeline_days(days);
    let timeline = with_cycle_service(config, |service| {
        Ok(service.timeline(service.today(), days))
    })
    .unwrap_or_else(|err| {
        let today = chrono::Local::now().date_naive();
        degraded("phase_timeline", &err, build_timeline(None, today, days))
    });
    to_timeline_view(timeline)
}

fn next_phase_change_with(config: &AppGroupConfig) -> Option<PhaseView> {
    with_cycle_service(config, |service| {
        Ok(service
            .next_transition(service.today())
            .map(|(date, phase)| to_phase_view(date, phase)))
    })
    .unwrap_or_else(|err| degraded("next_phase_change", &err, None))
}

fn normalize_timeline_days(days: Option<u32>) -> u32 {
    match days {
        Some(0) | None => DEFAULT_TIMELINE_DAYS,
        Some(value) if value > TIMELINE_DAYS_MAX => TIMELINE_DAYS_MAX,
        Some(value) => value,
    }
}

fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|err| format!("invalid date `{trimmed}`, expected YYYY-MM-DD: {err}"))
}

fn resolve_config() -> &'static AppGroupConfig {
    APP_GROUP_CONFIG.get_or_init(AppGroupConfig::from_env)
}

fn with_cycle_service<T>(
    config: &AppGroupConfig,
    f: impl FnOnce(&CycleService<SqliteSettingsRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn =
        open_db(&config.db_path).map_err(|err| format!("shared store open failed: {err}"))?;
    let store = SharedDateStore::new(
        SqliteSettingsRepository::new(&conn),
        config.app_group_id.as_str(),
    );
    let service = CycleService::new(store);
    f(&service)
}

fn degraded<T>(operation: &str, err: &str, fallback: T) -> T {
    warn!("event={operation} module=ffi status=degraded error={err}");
    fallback
}

fn unconfigured_today() -> PhaseView {
    let today = chrono::Local::now().date_naive();
    to_phase_view(today, CyclePhase::Unconfigured)
}

fn to_phase_view(date: NaiveDate, phase: CyclePhase) -> PhaseView {
    let tint = phase.gradient_tint();
    PhaseView {
        date: date.format(DATE_FORMAT).to_string(),
        kind: phase.kind_label().to_string(),
        day_index: phase.day_index(),
        display_text: phase.display_text().to_string(),
        subtitle_text: phase.subtitle_text(),
        accent: accent_label(phase.accent()).to_string(),
        progress: phase.progress(),
        tint_hue: tint.hue,
        tint_saturation: tint.saturation,
        tint_brightness: tint.brightness,
    }
}

fn to_timeline_view(timeline: PhaseTimeline) -> TimelineView {
    TimelineView {
        entries: timeline
            .entries
            .into_iter()
            .map(|entry| to_phase_view(entry.date, entry.phase))
            .collect(),
        refresh_on: timeline.refresh_on.format(DATE_FORMAT).to_string(),
    }
}

fn accent_label(accent: PhaseAccent) -> &'static str {
    match accent {
        PhaseAccent::Blue => "blue",
        PhaseAccent::Green => "green",
        PhaseAccent::Gray => "gray",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        clear_cycle_start_date_with, core_version, current_phase_with, get_cycle_start_date_with,
        init_logging, next_phase_change_with, normalize_timeline_days, phase_timeline_with, ping,
        set_cycle_start_date_with,
    };
    use chrono::{Duration, Local};
    use inout_core::AppGroupConfig;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, AppGroupConfig) {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppGroupConfig {
            app_group_id: "group.test.ffi".to_string(),
            db_path: dir.path().join("shared.sqlite3"),
        };
        (dir, config)
    }

    fn iso_days_from_today(days: i64) -> String {
        (Local::now().date_naive() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn fresh_store_reports_unconfigured() {
        let (_dir, config) = temp_config();

        let view = current_phase_with(&config);
        assert_eq!(view.kind, "unconfigured");
        assert_eq!(view.display_text, "SET DATE");
        assert_eq!(view.day_index, None);
        assert_eq!(get_cycle_start_date_with(&config), None);
        assert_eq!(next_phase_change_with(&config), None);
    }

    #[test]
    fn set_start_today_reports_first_out_day() {
        let (_dir, config) = temp_config();
        let today = iso_days_from_today(0);

        let response = set_cycle_start_date_with(&config, &today);
        assert!(response.ok, "{}", response.message);
        let phase = response.phase.expect("success carries today's phase");
        assert_eq!(phase.kind, "out");
        assert_eq!(phase.day_index, Some(0));
        assert_eq!(phase.subtitle_text, "Day 1 of 7");
        assert_eq!(phase.accent, "blue");
        assert_eq!(get_cycle_start_date_with(&config), Some(today));
    }

    #[test]
    fn timeline_starts_today_and_respects_limits() {
        let (_dir, config) = temp_config();
        let start = iso_days_from_today(-7);
        assert!(set_cycle_start_date_with(&config, &start).ok);

        let timeline = phase_timeline_with(&config, None);
        assert_eq!(timeline.entries.len(), 7);
        assert_eq!(timeline.entries[0].date, iso_days_from_today(0));
        assert_eq!(timeline.entries[0].kind, "in");
        assert_eq!(timeline.entries[0].day_index, Some(0));
        assert_eq!(timeline.refresh_on, iso_days_from_today(7));

        let capped = phase_timeline_with(&config, Some(90));
        assert_eq!(capped.entries.len(), 31);
        assert_eq!(capped.refresh_on, iso_days_from_today(31));
        assert_eq!(normalize_timeline_days(Some(0)), 7);
    }

    #[test]
    fn timeline_entries_carry_progress_and_tint() {
        let (_dir, config) = temp_config();
        assert!(set_cycle_start_date_with(&config, &iso_days_from_today(-6)).ok);

        let timeline = phase_timeline_with(&config, Some(2));
        let last_out = &timeline.entries[0];
        assert_eq!(last_out.kind, "out");
        assert_eq!(last_out.progress, Some(1.0));
        assert!((last_out.tint_hue - 0.67).abs() < 1e-9);
        assert!((last_out.tint_saturation - 0.75).abs() < 1e-9);
        assert!((last_out.tint_brightness - 0.55).abs() < 1e-9);

        let first_in = &timeline.entries[1];
        assert_eq!(first_in.kind, "in");
        assert_eq!(first_in.progress, Some(0.0));
        assert!((first_in.tint_hue - 0.33).abs() < 1e-9);
        assert!((first_in.tint_saturation - 0.8).abs() < 1e-9);
        assert!((first_in.tint_brightness - 0.75).abs() < 1e-9);
    }

    #[test]
    fn next_phase_change_points_at_boundary() {
        let (_dir, config) = temp_config();
        assert!(set_cycle_start_date_with(&config, &iso_days_from_today(-3)).ok);

        let change = next_phase_change_with(&config).expect("configured cycle has a next change");
        assert_eq!(change.date, iso_days_from_today(4));
        assert_eq!(change.kind, "in");
    }

    #[test]
    fn invalid_date_is_rejected_without_writing() {
        let (_dir, config) = temp_config();

        let response = set_cycle_start_date_with(&config, "2024-13-40");
        assert!(!response.ok);
        assert!(response.message.contains("YYYY-MM-DD"));
        assert_eq!(get_cycle_start_date_with(&config), None);
    }

    #[test]
    fn clear_returns_to_unconfigured() {
        let (_dir, config) = temp_config();
        assert!(set_cycle_start_date_with(&config, &iso_days_from_today(0)).ok);

        let response = clear_cycle_start_date_with(&config);
        assert!(response.ok, "{}", response.message);
        assert_eq!(
            response.phase.map(|view| view.kind),
            Some("unconfigured".to_string())
        );
        assert_eq!(current_phase_with(&config).kind, "unconfigured");
    }

    #[test]
    fn unavailable_store_degrades_to_unconfigured() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppGroupConfig {
            app_group_id: "group.test.ffi".to_string(),
            db_path: dir.path().join("missing").join("shared.sqlite3"),
        };

        let current = current_phase_with(&config);
        assert_eq!(current.kind, "unconfigured");
        assert_eq!(current.progress, None);
        assert_eq!(current.tint_saturation, 0.0);

        let timeline = phase_timeline_with(&config, Some(3));
        let dates = timeline
            .entries
            .iter()
            .map(|view| view.date.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                iso_days_from_today(0),
                iso_days_from_today(1),
                iso_days_from_today(2)
            ]
        );
        assert!(timeline.entries.iter().all(|view| view.kind == "unconfigured"));
        assert_eq!(timeline.refresh_on, iso_days_from_today(3));
        assert_eq!(phase_timeline_with(&config, None).entries.len(), 7);
        assert!(!set_cycle_start_date_with(&config, "2024-01-01").ok);
    }
}

use chrono::{NaiveDate, Utc};
use inout_core::db::open_db_in_memory;
use inout_core::{
    SharedDateStore, SqliteSettingsRepository, CYCLE_START_DATE_KEY, DEFAULT_APP_GROUP_ID,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct CapturedLog {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturedLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURED: CapturedLog = CapturedLog {
    records: Mutex::new(Vec::new()),
};

// One test per binary: the `log` facade accepts a single global logger.
#[test]
fn stored_dates_and_raw_values_stay_out_of_info_and_above() {
    log::set_logger(&CAPTURED).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let conn = open_db_in_memory().unwrap();
    let store = SharedDateStore::with_time_zone(
        SqliteSettingsRepository::new(&conn),
        DEFAULT_APP_GROUP_ID,
        Utc,
    );

    store
        .save_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .unwrap();
    assert!(store.load_start_date().is_some());

    conn.execute(
        "UPDATE shared_settings SET value = ?1 WHERE key = ?2",
        rusqlite::params![1e300_f64, CYCLE_START_DATE_KEY],
    )
    .unwrap();
    assert_eq!(store.load_start_date(), None);

    let records = CAPTURED.records.lock().unwrap().clone();
    let loud = records
        .iter()
        .filter(|(level, _)| *level <= Level::Info)
        .map(|(_, message)| message.as_str())
        .collect::<Vec<_>>();

    assert!(loud
        .iter()
        .any(|message| message.contains("status=invalid")));
    for message in &loud {
        assert!(!message.contains("value="), "{message}");
        assert!(!message.contains("2024-01-01"), "{message}");
        assert!(!message.contains("1704067200"), "{message}");
    }
    assert!(records.iter().any(|(level, message)| {
        *level == Level::Debug && message.contains("status=invalid") && message.contains("value=")
    }));
}

// One browser session: preferences and logbook share the same storage, and
// a reload sees exactly what was written.

use approx::assert_relative_eq;
use aviation_records::{
    FlightPlan, KeyValueStore, LogBook, MemoryStore, NewFlightLog, Preferences, FLIGHT_LOGS_KEY,
    PREFERENCES_KEY,
};
use chrono::NaiveDate;

fn flight(day: u32, tail: &str, time: &str) -> anyhow::Result<NewFlightLog> {
    Ok(NewFlightLog {
        date: NaiveDate::from_ymd_opt(2024, 7, day).ok_or_else(|| anyhow::anyhow!("bad date"))?,
        aircraft_n_number: tail.into(),
        flight_time: time.into(),
        notes: "xc".into(),
    })
}

#[test]
fn logbook_and_preferences_survive_a_reload() -> anyhow::Result<()> {
    let mut storage = MemoryStore::new();

    let prefs = Preferences { dark_mode: true, ..Preferences::default() };
    prefs.save(&mut storage)?;

    let ids = {
        let mut book = LogBook::in_store(&mut storage);
        let a = book.add(flight(1, "n5213k", "1.4")?)?;
        let b = book.add(flight(3, "N5213K", "2:06")?)?;
        vec![a.id, b.id]
    };
    assert!(storage.get(FLIGHT_LOGS_KEY).is_some());
    assert!(storage.get(PREFERENCES_KEY).is_some());

    // reload
    let book = LogBook::in_store(storage.clone());
    let logs = book.entries()?;
    assert_eq!(logs.iter().map(|l| l.id.clone()).collect::<Vec<_>>(), vec![ids[1].clone(), ids[0].clone()]);
    assert_relative_eq!(book.total_flight_time_hours()?, 3.5, epsilon = 1e-12);
    assert_eq!(book.formatted_total()?, "3:30");
    assert_eq!(book.summary()?.aircraft_flown, 1);
    assert!(Preferences::load(&storage).dark_mode);
    Ok(())
}

#[test]
fn nav_log_export_round_trip_keeps_the_sheet() -> anyhow::Result<()> {
    let mut plan = FlightPlan::new();
    plan.info.tail_number = "N5213K".into();
    plan.info.fuel_on_board = "38".into();
    plan.add_checkpoint();

    let last = plan.checkpoints().last().map(|c| c.id.clone()).unwrap_or_default();
    if let Some(dest) = plan.checkpoint_mut(&last) {
        dest.distance = "31".into();
        dest.fuel_used = "4.2".into();
        dest.eta = "0:25".into();
    }

    let exported: serde_json::Value = serde_json::from_str(&plan.to_json(chrono::Utc::now())?)?;
    let sheet: Vec<aviation_records::Checkpoint> = serde_json::from_value(exported["checkpoints"].clone())?;
    assert_eq!(sheet, plan.checkpoints());
    assert_eq!(exported["totals"]["totalETE"], 25.0);
    assert_eq!(exported["totals"]["lowReserve"], false);
    Ok(())
}

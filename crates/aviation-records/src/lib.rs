//! aviation-records
//!
//! The stateful side of the app: a pilot's logbook, the VFR nav-log sheet and
//! user preferences. Everything persists through [`KeyValueStore`], a plain
//! string-keyed blob medium the host provides (browser localStorage, a file,
//! or [`MemoryStore`] in tests).
//!
//! Exports:
//!   - `LogBook` over any `RecordStore<FlightLog>`
//!   - `FlightPlan` with checkpoint editing, totals and JSON export
//!   - `Preferences` load/save

pub mod error;
pub mod flight_plan;
pub mod logbook;
pub mod preferences;
pub mod store;

pub use error::{RecordError, Result};
pub use flight_plan::{Checkpoint, FlightInfo, FlightPlan, PlanTotals, LOW_RESERVE_GAL};
pub use logbook::{FlightLog, LogBook, LogSummary, NewFlightLog, FLIGHT_LOGS_KEY};
pub use preferences::{Preferences, PREFERENCES_KEY};
pub use store::{JsonRecordStore, KeyValueStore, MemoryStore, Record, RecordStore};

//! Pilot logbook.
//!
//! Entries are stored newest first. Flight time is typed either as decimal
//! hours ("1.3") or as elapsed `H:MM` ("1:18"); both are kept as hours.

use std::collections::BTreeSet;

use aviation_core::{format_flight_time, parse_duration_minutes, CalcError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{RecordError, Result};
use crate::store::{JsonRecordStore, KeyValueStore, Record, RecordStore};

/// Key the logbook blob lives under.
pub const FLIGHT_LOGS_KEY: &str = "flightLogs";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLog {
    pub id: String,
    /// `None` for a stored entry whose date was blank or unreadable.
    #[serde(default, deserialize_with = "date_or_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "aircraftNNumber")]
    pub aircraft_n_number: String,
    #[serde(rename = "flightTime", deserialize_with = "hours_from_number_or_text")]
    pub flight_time_hours: f64,
    #[serde(default)]
    pub notes: String,
    /// Unix milliseconds at entry time.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl Record for FlightLog {
    fn id(&self) -> &str {
        &self.id
    }
}

/// What the pilot fills in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlightLog {
    pub date: NaiveDate,
    #[serde(rename = "aircraftNNumber")]
    pub aircraft_n_number: String,
    pub flight_time: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub total_flights: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    /// Distinct N-numbers.
    pub aircraft_flown: usize,
}

pub struct LogBook<S> {
    store: S,
}

impl<K: KeyValueStore> LogBook<JsonRecordStore<K>> {
    /// Logbook kept under [`FLIGHT_LOGS_KEY`].
    pub fn in_store(kv: K) -> Self {
        Self::new(JsonRecordStore::new(kv, FLIGHT_LOGS_KEY))
    }
}

impl<S: RecordStore<FlightLog>> LogBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate and record a flight, stamped now.
    pub fn add(&mut self, entry: NewFlightLog) -> Result<FlightLog> {
        self.add_at(entry, Utc::now().timestamp_millis())
    }

    pub fn add_at(&mut self, entry: NewFlightLog, timestamp_ms: i64) -> Result<FlightLog> {
        let tail = entry.aircraft_n_number.trim();
        if tail.is_empty() {
            return Err(RecordError::MissingField("aircraft N-number"));
        }
        let time = entry.flight_time.trim();
        if time.is_empty() {
            return Err(RecordError::MissingField("flight time"));
        }
        let hours = parse_flight_time(time)
            .ok_or_else(|| RecordError::InvalidFlightTime(time.to_owned()))?;
        if hours < 0.0 {
            return Err(CalcError::Negative { field: "flight time", value: hours }.into());
        }

        let log = FlightLog {
            id: Uuid::new_v4().to_string(),
            date: Some(entry.date),
            aircraft_n_number: tail.to_uppercase(),
            flight_time_hours: hours,
            notes: entry.notes,
            timestamp_ms,
        };
        tracing::debug!(id = %log.id, tail = %log.aircraft_n_number, hours, "logged flight");
        self.store.save(log.clone())?;
        Ok(log)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store.delete(id)
    }

    /// Newest first.
    pub fn entries(&self) -> Result<Vec<FlightLog>> {
        self.store.load_all()
    }

    pub fn total_flight_time_hours(&self) -> Result<f64> {
        Ok(self.entries()?.iter().map(|l| l.flight_time_hours).sum())
    }

    /// Total as `H:MM`.
    pub fn formatted_total(&self) -> Result<String> {
        Ok(format_flight_time(self.total_flight_time_hours()?))
    }

    pub fn summary(&self) -> Result<LogSummary> {
        let logs = self.entries()?;
        if logs.is_empty() {
            return Ok(LogSummary::default());
        }
        let total_hours: f64 = logs.iter().map(|l| l.flight_time_hours).sum();
        let aircraft: BTreeSet<&str> = logs.iter().map(|l| l.aircraft_n_number.as_str()).collect();
        #[allow(clippy::cast_precision_loss)]
        let average_hours = total_hours / logs.len() as f64;
        Ok(LogSummary {
            total_flights: logs.len(),
            total_hours,
            average_hours,
            aircraft_flown: aircraft.len(),
        })
    }
}

/* ------------------------------- internals ------------------------------- */

/// "1.3" or "1:18" as hours.
fn parse_flight_time(text: &str) -> Option<f64> {
    if text.contains(':') {
        return parse_duration_minutes(text).map(|m| f64::from(m) / 60.0);
    }
    text.parse::<f64>().ok().filter(|h| h.is_finite())
}

/// Older blobs store flight time as the text the pilot typed; anything
/// unreadable counts as zero.
fn hours_from_number_or_text<'de, D>(de: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Number(h) => h,
        Raw::Text(s) => parse_flight_time(s.trim()).unwrap_or_else(|| {
            tracing::debug!(text = %s, "unreadable stored flight time, counting as zero");
            0.0
        }),
    })
}

/// Older blobs may hold an empty or free-form date; such an entry loads
/// without one instead of failing the whole logbook.
fn date_or_none<'de, D>(de: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    let date = text.trim().parse::<NaiveDate>().ok();
    if date.is_none() {
        tracing::debug!(text = %text, "unreadable stored flight date, keeping entry undated");
    }
    Ok(date)
}

// crates/aviation-ffi-wasm/src/lib.rs
//
// WASM bindings: calculators, weight & balance, logbook and nav log.
// Calculator outputs are rounded to what the cards display.

use chrono::{DateTime, NaiveDate, Utc};
use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use aviation_core::{
    cloud_base_ft_agl, convert_distance, density_altitude, final_bearing_deg, format_flight_time,
    great_circle_distance_nm, initial_bearing_deg, resolve_crosswind, solve_fuel_plan,
    solve_time_speed_distance, solve_wind_triangle, true_airspeed, utc_to_local, CloudBaseInput,
    CrosswindInput, DensityAltitudeInput, DistanceUnit, FuelPlanInput, GreatCircleInput,
    TimeSpeedDistanceInput, TrueAirspeedInput, TsdTarget, WindTriangleInput,
};
use aviation_models::{all_profiles, profile, AircraftProfile};
use aviation_records::{
    Checkpoint, FlightInfo, FlightLog, FlightPlan, JsonRecordStore, LogBook, MemoryStore,
    NewFlightLog, Preferences, KeyValueStore, PREFERENCES_KEY,
};
use aviation_wb::{default_rows, solve, AircraftData, Limits, LoadRow};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    swb::to_value(value).map_err(|e| e.into())
}

/* ------------------------------ Atmosphere ------------------------------ */

#[wasm_bindgen]
pub fn density_altitude_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: DensityAltitudeInput = swb::from_value(input)?;
    let r = density_altitude(&inp).map_err(js_err)?;
    to_js(&r)
}

#[wasm_bindgen]
pub fn true_airspeed_js(input: JsValue) -> Result<f64, JsValue> {
    let inp: TrueAirspeedInput = swb::from_value(input)?;
    true_airspeed(&inp).map(f64::round).map_err(js_err)
}

#[wasm_bindgen]
pub fn cloud_base_js(input: JsValue) -> Result<f64, JsValue> {
    let inp: CloudBaseInput = swb::from_value(input)?;
    cloud_base_ft_agl(&inp).map(f64::round).map_err(js_err)
}

/* --------------------------------- Wind --------------------------------- */

#[wasm_bindgen]
pub fn wind_triangle_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: WindTriangleInput = swb::from_value(input)?;
    let r = solve_wind_triangle(&inp).map_err(js_err)?;
    to_js(&r.rounded())
}

#[wasm_bindgen]
pub fn crosswind_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: CrosswindInput = swb::from_value(input)?;
    let r = resolve_crosswind(&inp).map_err(js_err)?;
    to_js(&r.rounded())
}

/* ------------------------------ Navigation ------------------------------ */

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsGreatCircleResult {
    pub distance_nm: f64,
    pub initial_bearing_deg: f64,
    pub final_bearing_deg: f64,
}

#[wasm_bindgen]
pub fn great_circle_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: GreatCircleInput = swb::from_value(input)?;
    let out = JsGreatCircleResult {
        distance_nm: (great_circle_distance_nm(&inp).map_err(js_err)? * 10.0).round() / 10.0,
        initial_bearing_deg: initial_bearing_deg(&inp).map_err(js_err)?.round(),
        final_bearing_deg: final_bearing_deg(&inp).map_err(js_err)?.round(),
    };
    to_js(&out)
}

#[wasm_bindgen]
pub fn convert_distance_js(value: f64, unit: JsValue) -> Result<JsValue, JsValue> {
    let unit: DistanceUnit = swb::from_value(unit)?;
    let r = convert_distance(value, unit).map_err(js_err)?;
    to_js(&r)
}

/* ------------------------------- Planning ------------------------------- */

/// `target` is "distance" | "time" | "speed".
#[wasm_bindgen]
pub fn time_speed_distance_js(input: JsValue, target: JsValue) -> Result<f64, JsValue> {
    let inp: TimeSpeedDistanceInput = swb::from_value(input)?;
    let target: TsdTarget = swb::from_value(target)?;
    solve_time_speed_distance(&inp, target).map_err(js_err)
}

#[wasm_bindgen]
pub fn fuel_plan_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: FuelPlanInput = swb::from_value(input)?;
    let r = solve_fuel_plan(&inp).map_err(js_err)?;
    to_js(&r)
}

#[wasm_bindgen]
pub fn utc_to_local_js(utc: &str, offset_hr: f64) -> Result<String, JsValue> {
    utc_to_local(utc, offset_hr).map_err(js_err)
}

#[wasm_bindgen]
pub fn format_flight_time_js(hours: f64) -> String {
    format_flight_time(hours)
}

/* --------------------------- Weight & balance --------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsWeightBalanceInput {
    /// Defaults to the C172 when unknown or absent.
    #[serde(default)]
    pub profile_id: Option<String>,
    pub rows: Vec<LoadRow>,
    /// Overrides the profile's constants (edited on the card).
    #[serde(default)]
    pub aircraft: Option<AircraftData>,
    #[serde(default)]
    pub limits: Option<Limits>,
}

fn selected_profile(id: Option<&str>) -> &'static AircraftProfile {
    id.and_then(profile).unwrap_or_else(aviation_models::default_profile)
}

#[wasm_bindgen]
pub fn aircraft_profiles_js() -> Result<JsValue, JsValue> {
    to_js(&all_profiles())
}

#[wasm_bindgen]
pub fn default_load_rows_js(profile_id: Option<String>) -> Result<JsValue, JsValue> {
    let aircraft = AircraftData::from_profile(selected_profile(profile_id.as_deref()));
    to_js(&default_rows(&aircraft))
}

#[wasm_bindgen]
pub fn weight_balance_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsWeightBalanceInput = swb::from_value(input)?;
    let p = selected_profile(inp.profile_id.as_deref());
    let aircraft = inp.aircraft.unwrap_or_else(|| AircraftData::from_profile(p));
    let limits = inp.limits.unwrap_or_else(|| Limits::from_profile(p));
    let r = solve(&inp.rows, &aircraft, &limits).map_err(js_err)?;
    to_js(&r)
}

/* ------------------------------ Preferences ----------------------------- */

/// Preferences from the stored JSON (or defaults when absent/unreadable).
#[wasm_bindgen]
pub fn load_preferences_js(json: Option<String>) -> Result<JsValue, JsValue> {
    let mut kv = MemoryStore::new();
    if let Some(json) = json {
        kv.set(PREFERENCES_KEY, json);
    }
    to_js(&Preferences::load(&kv))
}

/// JSON to store for the given preferences.
#[wasm_bindgen]
pub fn save_preferences_js(prefs: JsValue) -> Result<String, JsValue> {
    let prefs: Preferences = swb::from_value(prefs)?;
    let mut kv = MemoryStore::new();
    prefs.save(&mut kv).map_err(js_err)?;
    kv.get(PREFERENCES_KEY).ok_or_else(|| js_err("preferences were not written"))
}

/* -------------------------------- Logbook ------------------------------- */

/// Logbook held in memory; the host persists `export_json()` (e.g. in
/// localStorage under "flightLogs") and feeds it back with `import_json`.
#[wasm_bindgen]
pub struct WasmLogBook {
    inner: LogBook<JsonRecordStore<MemoryStore>>,
}

#[wasm_bindgen]
impl WasmLogBook {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLogBook {
        WasmLogBook { inner: LogBook::in_store(MemoryStore::new()) }
    }

    /// Replace all entries with a stored blob; returns how many were loaded.
    pub fn import_json(&mut self, json: &str) -> Result<usize, JsValue> {
        self.inner.store_mut().replace_raw::<FlightLog>(json).map_err(js_err)
    }

    pub fn export_json(&self) -> String {
        self.inner.store().raw().unwrap_or_else(|| "[]".to_owned())
    }

    /// `{ date, aircraftNNumber, flightTime, notes }` -> the stored entry.
    pub fn add(&mut self, entry: JsValue) -> Result<JsValue, JsValue> {
        let entry: NewFlightLog = swb::from_value(entry)?;
        let log = self.inner.add(entry).map_err(js_err)?;
        to_js(&log)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.delete(id).map_err(js_err)
    }

    pub fn entries(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.entries().map_err(js_err)?)
    }

    pub fn formatted_total(&self) -> Result<String, JsValue> {
        self.inner.formatted_total().map_err(js_err)
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.summary().map_err(js_err)?)
    }
}

impl Default for WasmLogBook {
    fn default() -> Self {
        Self::new()
    }
}

/* -------------------------------- Nav log ------------------------------- */

#[wasm_bindgen]
pub struct WasmFlightPlan {
    inner: FlightPlan,
}

#[wasm_bindgen]
impl WasmFlightPlan {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmFlightPlan {
        WasmFlightPlan { inner: FlightPlan::new() }
    }

    pub fn checkpoints(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.checkpoints())
    }

    pub fn set_info(&mut self, info: JsValue) -> Result<(), JsValue> {
        self.inner.info = swb::from_value::<FlightInfo>(info)?;
        Ok(())
    }

    /// Overwrite one checkpoint's cells; its id and name are kept.
    pub fn update_checkpoint(&mut self, id: &str, cells: JsValue) -> Result<(), JsValue> {
        let cells: Checkpoint = swb::from_value(cells)?;
        let cp = self
            .inner
            .checkpoint_mut(id)
            .ok_or_else(|| js_err(format!("no checkpoint with id {id:?}")))?;
        *cp = Checkpoint { id: cp.id.clone(), name: cp.name.clone(), ..cells };
        Ok(())
    }

    /// Returns the new checkpoint's id.
    pub fn add_checkpoint(&mut self) -> String {
        self.inner.add_checkpoint().id.clone()
    }

    pub fn remove_checkpoint(&mut self, id: &str) -> bool {
        self.inner.remove_checkpoint(id)
    }

    /// Fills WCA, headings and ground speed; `undefined` when inputs are missing.
    pub fn solve_leg(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let solved = self.inner.solve_leg(id).map_err(js_err)?;
        to_js(&solved)
    }

    pub fn totals(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.totals())
    }

    /// `generated_at` is an RFC 3339 timestamp from the host clock.
    pub fn to_json(&self, generated_at: &str) -> Result<String, JsValue> {
        let at = chrono_utc(generated_at)?;
        self.inner.to_json(at).map_err(js_err)
    }

    /// `date` is `YYYY-MM-DD`.
    pub fn export_file_name(&self, date: &str) -> Result<String, JsValue> {
        let date: NaiveDate = date.parse().map_err(js_err)?;
        Ok(self.inner.export_file_name(date))
    }
}

impl Default for WasmFlightPlan {
    fn default() -> Self {
        Self::new()
    }
}

fn chrono_utc(text: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(js_err)
}

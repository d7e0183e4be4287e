//! aviation-wb
//!
//! Weight & balance for a loading sheet of named rows.
//! - Each row carries a [`RowKind`] fixed when the row is created.
//! - Payload rows contribute their own weight × arm.
//! - Fuel always sits at the aircraft's fixed fuel arm, whatever arm a fuel row shows.
//! - Startup/taxi and en-route burn come off as fixed deductions at the fuel arm;
//!   deduction rows are informational and never summed.
//!
//! Maths (fuel = Σ fuel row weights, 0 without a fuel row):
//!   ramp     W = Σ payload_w + fuel,          M = Σ payload_w·arm + fuel·fuel_arm
//!   takeoff  W = max(0, W_ramp − startup),    M = max(0, M_ramp − startup·fuel_arm)
//!   landing  W = max(0, W_takeoff − burn),    M = max(0, M_takeoff − burn·fuel_arm)
//!   CG = M / W, reported as 0 while W is 0 (nothing entered yet)
//!
//! Takeoff and landing weights and moments never go below zero, so an
//! over-deducted half-filled sheet reads as an empty airplane.
//!
//! Limits are checked at the ramp condition only.

use aviation_core::error::{ensure_finite, ensure_non_negative};
use aviation_core::Result;
use aviation_models::AircraftProfile;
use serde::{Deserialize, Serialize};

/// What a loading row represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Payload,
    Fuel,
    StartupDeduction,
    BurnDeduction,
}

const STARTUP_WORDS: &[&str] = &["startup", "taxi", "runup"];
const BURN_WORDS: &[&str] = &["burn", "enroute", "en-route"];
const DEDUCTION_WORDS: &[&str] = &["startup", "taxi", "runup", "burn", "enroute", "en-route"];

impl RowKind {
    /// Guess a kind from a free-text row label.
    ///
    /// Only for importing sheets saved without kinds. A label is fuel when some
    /// "fuel" in it has no deduction word after it: "Taxi fuel" and "Burn fuel"
    /// are fuel, "Fuel burn" is a burn deduction. Otherwise startup words win
    /// over burn words.
    pub fn infer_from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        let has_any = |text: &str, words: &[&str]| words.iter().any(|w| text.contains(w));

        let is_fuel = lower
            .rfind("fuel")
            .is_some_and(|at| !has_any(&lower[at + "fuel".len()..], DEDUCTION_WORDS));

        if is_fuel {
            RowKind::Fuel
        } else if has_any(&lower, STARTUP_WORDS) {
            RowKind::StartupDeduction
        } else if has_any(&lower, BURN_WORDS) {
            RowKind::BurnDeduction
        } else {
            RowKind::Payload
        }
    }
}

/// One line of the loading sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadRow {
    pub name: String,
    pub kind: RowKind,
    pub weight_lb: f64,
    pub arm_in: f64,
}

impl LoadRow {
    pub fn new(name: impl Into<String>, kind: RowKind, weight_lb: f64, arm_in: f64) -> Self {
        Self { name: name.into(), kind, weight_lb, arm_in }
    }

    pub fn payload(name: impl Into<String>, weight_lb: f64, arm_in: f64) -> Self {
        Self::new(name, RowKind::Payload, weight_lb, arm_in)
    }

    /// Fuel row; the arm shown is for display, the fixed fuel arm is used.
    pub fn fuel(name: impl Into<String>, weight_lb: f64, arm_in: f64) -> Self {
        Self::new(name, RowKind::Fuel, weight_lb, arm_in)
    }

    /// Row from an untagged sheet, kind guessed from its label.
    pub fn from_label(name: impl Into<String>, weight_lb: f64, arm_in: f64) -> Self {
        let name = name.into();
        let kind = RowKind::infer_from_label(&name);
        Self { name, kind, weight_lb, arm_in }
    }

    pub fn moment(&self) -> f64 {
        self.weight_lb * self.arm_in
    }
}

/// Fixed aircraft constants for a loading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    pub empty_weight_lb: f64,
    pub empty_arm_in: f64,
    /// Full usable fuel; seeds the fuel row of a new sheet.
    pub fuel_weight_lb: f64,
    pub fuel_arm_in: f64,
    pub ramp_arm_in: f64,
    pub takeoff_arm_in: f64,
    pub landing_arm_in: f64,
    pub startup_deduction_lb: f64,
    pub burn_deduction_lb: f64,
}

impl AircraftData {
    pub fn from_profile(p: &AircraftProfile) -> Self {
        Self {
            empty_weight_lb: p.empty_weight_lb,
            empty_arm_in: p.empty_arm_in,
            fuel_weight_lb: p.fuel_weight_lb,
            fuel_arm_in: p.fuel_arm_in,
            ramp_arm_in: p.ramp_arm_in,
            takeoff_arm_in: p.takeoff_arm_in,
            landing_arm_in: p.landing_arm_in,
            startup_deduction_lb: p.startup_deduction_lb,
            burn_deduction_lb: p.burn_deduction_lb,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("empty arm", self.empty_arm_in)?;
        ensure_finite("fuel arm", self.fuel_arm_in)?;
        ensure_finite("ramp arm", self.ramp_arm_in)?;
        ensure_finite("takeoff arm", self.takeoff_arm_in)?;
        ensure_finite("landing arm", self.landing_arm_in)?;
        ensure_non_negative("empty weight", self.empty_weight_lb)?;
        ensure_non_negative("fuel weight", self.fuel_weight_lb)?;
        ensure_non_negative("startup deduction", self.startup_deduction_lb)?;
        ensure_non_negative("burn deduction", self.burn_deduction_lb)?;
        Ok(())
    }
}

impl Default for AircraftData {
    fn default() -> Self {
        Self::from_profile(aviation_models::default_profile())
    }
}

/// Certified limits the ramp condition is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_weight_lb: f64,
    pub forward_cg_in: f64,
    pub aft_cg_in: f64,
}

impl Limits {
    pub fn from_profile(p: &AircraftProfile) -> Self {
        Self {
            max_weight_lb: p.max_weight_lb,
            forward_cg_in: p.forward_cg_in,
            aft_cg_in: p.aft_cg_in,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("maximum weight", self.max_weight_lb)?;
        ensure_finite("forward CG limit", self.forward_cg_in)?;
        ensure_finite("aft CG limit", self.aft_cg_in)?;
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from_profile(aviation_models::default_profile())
    }
}

/// Totals for the three loading conditions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightBalanceResult {
    pub payload_weight_lb: f64,
    pub payload_moment_lb_in: f64,
    pub fuel_weight_lb: f64,
    pub fuel_moment_lb_in: f64,

    pub ramp_weight_lb: f64,
    pub ramp_moment_lb_in: f64,
    pub ramp_cg_in: f64,

    pub startup_moment_lb_in: f64,
    pub takeoff_weight_lb: f64,
    pub takeoff_moment_lb_in: f64,
    pub takeoff_cg_in: f64,

    pub burn_moment_lb_in: f64,
    pub landing_weight_lb: f64,
    pub landing_moment_lb_in: f64,
    pub landing_cg_in: f64,

    /// Fixed arms printed on the summary rows.
    pub ramp_arm_in: f64,
    pub takeoff_arm_in: f64,
    pub landing_arm_in: f64,

    pub within_weight_limit: bool,
    pub within_cg_envelope: bool,
}

impl WeightBalanceResult {
    pub fn is_within_limits(&self) -> bool {
        self.within_weight_limit && self.within_cg_envelope
    }
}

/// The sheet a new loading starts from: empty weight, front seats, rear seats,
/// baggage and full fuel.
pub fn default_rows(aircraft: &AircraftData) -> Vec<LoadRow> {
    vec![
        LoadRow::payload("Empty Weight", aircraft.empty_weight_lb, aircraft.empty_arm_in),
        LoadRow::payload("Pilot & Front Passenger", 0.0, 37.0),
        LoadRow::payload("Rear Passengers", 0.0, 73.0),
        LoadRow::payload("Baggage", 0.0, 95.0),
        LoadRow::fuel("Fuel (lbs)", aircraft.fuel_weight_lb, aircraft.fuel_arm_in),
    ]
}

/// Top-level API: ramp, takeoff and landing weight, moment and CG.
///
/// Fuel weight is the sum of all `Fuel` rows; a sheet without one carries no fuel.
pub fn solve(
    rows: &[LoadRow],
    aircraft: &AircraftData,
    limits: &Limits,
) -> Result<WeightBalanceResult> {
    aircraft.validate()?;
    limits.validate()?;

    let mut payload_weight = 0.0;
    let mut payload_moment = 0.0;
    let mut fuel_weight = 0.0;

    for row in rows {
        if let Err(e) = validate_row(row) {
            tracing::debug!(row = %row.name, error = %e, "rejected loading row");
            return Err(e);
        }
        match row.kind {
            RowKind::Payload => {
                payload_weight += row.weight_lb;
                payload_moment += row.moment();
            }
            RowKind::Fuel => {
                fuel_weight += row.weight_lb;
            }
            RowKind::StartupDeduction | RowKind::BurnDeduction => {}
        }
    }

    let fuel_arm = aircraft.fuel_arm_in;
    let fuel_moment = fuel_weight * fuel_arm;

    // 1) Ramp
    let ramp_weight = payload_weight + fuel_weight;
    let ramp_moment = payload_moment + fuel_moment;

    // 2) Takeoff: startup/taxi/runup fuel is gone
    let startup_moment = aircraft.startup_deduction_lb * fuel_arm;
    let takeoff_weight = (ramp_weight - aircraft.startup_deduction_lb).max(0.0);
    let takeoff_moment = (ramp_moment - startup_moment).max(0.0);

    // 3) Landing: en-route burn is gone
    let burn_moment = aircraft.burn_deduction_lb * fuel_arm;
    let landing_weight = (takeoff_weight - aircraft.burn_deduction_lb).max(0.0);
    let landing_moment = (takeoff_moment - burn_moment).max(0.0);

    let ramp_cg = cg(ramp_moment, ramp_weight);
    let within_weight_limit = ramp_weight <= limits.max_weight_lb;
    let within_cg_envelope = (limits.forward_cg_in..=limits.aft_cg_in).contains(&ramp_cg);

    if ramp_weight > 0.0 && !(within_weight_limit && within_cg_envelope) {
        tracing::warn!(
            ramp_weight,
            ramp_cg,
            max_weight = limits.max_weight_lb,
            forward = limits.forward_cg_in,
            aft = limits.aft_cg_in,
            "loading outside limits"
        );
    }

    Ok(WeightBalanceResult {
        payload_weight_lb: payload_weight,
        payload_moment_lb_in: payload_moment,
        fuel_weight_lb: fuel_weight,
        fuel_moment_lb_in: fuel_moment,
        ramp_weight_lb: ramp_weight,
        ramp_moment_lb_in: ramp_moment,
        ramp_cg_in: ramp_cg,
        startup_moment_lb_in: startup_moment,
        takeoff_weight_lb: takeoff_weight,
        takeoff_moment_lb_in: takeoff_moment,
        takeoff_cg_in: cg(takeoff_moment, takeoff_weight),
        burn_moment_lb_in: burn_moment,
        landing_weight_lb: landing_weight,
        landing_moment_lb_in: landing_moment,
        landing_cg_in: cg(landing_moment, landing_weight),
        ramp_arm_in: aircraft.ramp_arm_in,
        takeoff_arm_in: aircraft.takeoff_arm_in,
        landing_arm_in: aircraft.landing_arm_in,
        within_weight_limit,
        within_cg_envelope,
    })
}

/* ------------------------------- internals ------------------------------- */

fn cg(moment: f64, weight: f64) -> f64 {
    if weight > 0.0 { moment / weight } else { 0.0 }
}

fn validate_row(row: &LoadRow) -> Result<()> {
    ensure_non_negative("row weight", row.weight_lb)?;
    ensure_finite("row arm", row.arm_in)?;
    Ok(())
}

/* ----------------------------------- tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use aviation_core::CalcError;

    fn c172() -> (AircraftData, Limits) {
        (AircraftData::default(), Limits::default())
    }

    #[test]
    fn empty_sheet_without_fuel_is_degenerate_not_an_error() {
        let (aircraft, limits) = c172();
        let r = solve(&[], &aircraft, &limits).unwrap();
        assert_eq!(r.ramp_weight_lb, 0.0);
        assert_eq!(r.ramp_cg_in, 0.0);
        assert_eq!(r.takeoff_cg_in, 0.0);
        assert_eq!(r.landing_cg_in, 0.0);
        assert!(r.within_weight_limit);
        // A CG of 0 is never inside a real envelope
        assert!(!r.within_cg_envelope);
    }

    #[test]
    fn negative_max_weight_fails_the_vacuous_case() {
        let (aircraft, mut limits) = c172();
        limits.max_weight_lb = -1.0;
        assert!(!solve(&[], &aircraft, &limits).unwrap().within_weight_limit);
    }

    #[test]
    fn moments_and_cg_follow_the_rows() {
        let (aircraft, limits) = c172();
        let rows = vec![
            LoadRow::payload("Empty Weight", 1720.9, 41.9),
            LoadRow::payload("Pilot & Front Passenger", 340.0, 37.0),
            LoadRow::payload("Baggage", 20.0, 95.0),
            LoadRow::fuel("Fuel (lbs)", 180.0, 999.0),
        ];
        let r = solve(&rows, &aircraft, &limits).unwrap();

        let payload_moment = 1720.9 * 41.9 + 340.0 * 37.0 + 20.0 * 95.0;
        assert_relative_eq!(r.payload_moment_lb_in, payload_moment);
        // Fuel at the fixed 48 in arm, never the row's 999
        assert_relative_eq!(r.fuel_moment_lb_in, 180.0 * 48.0);
        assert_relative_eq!(r.ramp_weight_lb, 1720.9 + 340.0 + 20.0 + 180.0);
        assert_relative_eq!(r.ramp_moment_lb_in, payload_moment + 180.0 * 48.0);
        assert_relative_eq!(r.ramp_cg_in, r.ramp_moment_lb_in / r.ramp_weight_lb);

        assert_relative_eq!(r.takeoff_weight_lb, r.ramp_weight_lb - 8.0);
        assert_relative_eq!(r.takeoff_moment_lb_in, r.ramp_moment_lb_in - 384.0);
        assert_relative_eq!(r.landing_weight_lb, r.takeoff_weight_lb - 120.0);
        assert_relative_eq!(r.landing_moment_lb_in, r.takeoff_moment_lb_in - 5760.0);
        assert_relative_eq!(r.landing_cg_in, r.landing_moment_lb_in / r.landing_weight_lb);
        assert!(r.is_within_limits());
    }

    #[test]
    fn deduction_rows_are_not_payload() {
        let (aircraft, limits) = c172();
        let rows = vec![
            LoadRow::payload("Empty Weight", 1720.9, 41.9),
            LoadRow::new("Startup, taxi & runup", RowKind::StartupDeduction, 8.0, 48.0),
            LoadRow::new("Enroute burn", RowKind::BurnDeduction, 120.0, 48.0),
        ];
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert_relative_eq!(r.payload_weight_lb, 1720.9);
        assert_eq!(r.fuel_weight_lb, 0.0);
    }

    #[test]
    fn sheet_without_fuel_row_carries_no_fuel() {
        let (aircraft, limits) = c172();
        let rows = vec![LoadRow::payload("Empty Weight", 1720.9, 41.9)];
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert_eq!(r.fuel_weight_lb, 0.0);
        assert_eq!(r.fuel_moment_lb_in, 0.0);
        assert_relative_eq!(r.ramp_weight_lb, 1720.9);
        assert_relative_eq!(r.ramp_cg_in, 41.9);
    }

    #[test]
    fn fuel_rows_add_up() {
        let (aircraft, limits) = c172();
        let rows = vec![
            LoadRow::fuel("Left tank", 100.0, 48.0),
            LoadRow::fuel("Right tank", 80.0, 48.0),
        ];
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert_relative_eq!(r.fuel_weight_lb, 180.0);
    }

    #[test]
    fn over_deduction_floors_at_zero() {
        let (aircraft, limits) = c172();
        let rows = vec![LoadRow::fuel("Fuel", 50.0, 48.0)];
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert_relative_eq!(r.takeoff_weight_lb, 42.0);
        assert_eq!(r.landing_weight_lb, 0.0);
        assert_eq!(r.landing_moment_lb_in, 0.0);
        assert_eq!(r.landing_cg_in, 0.0);
    }

    #[test]
    fn overweight_and_aft_cg_are_flagged() {
        let (aircraft, limits) = c172();
        let mut rows = default_rows(&aircraft);
        rows[3].weight_lb = 120.0; // baggage
        rows[2].weight_lb = 340.0; // rear seats
        rows[1].weight_lb = 340.0;
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert!(!r.within_weight_limit);
        assert!(r.ramp_weight_lb > 2300.0);

        let rows = vec![
            LoadRow::payload("Empty Weight", 1000.0, 41.9),
            LoadRow::payload("Baggage", 400.0, 95.0),
        ];
        let r = solve(&rows, &aircraft, &limits).unwrap();
        assert!(r.within_weight_limit);
        assert!(!r.within_cg_envelope);
        assert!(r.ramp_cg_in > limits.aft_cg_in);
    }

    #[test]
    fn bad_rows_are_rejected() {
        let (aircraft, limits) = c172();
        let rows = vec![LoadRow::payload("Pilot", -170.0, 37.0)];
        assert!(matches!(
            solve(&rows, &aircraft, &limits),
            Err(CalcError::Negative { field: "row weight", .. })
        ));
        let rows = vec![LoadRow::payload("Pilot", 170.0, f64::NAN)];
        assert!(matches!(
            solve(&rows, &aircraft, &limits),
            Err(CalcError::NonFinite { field: "row arm" })
        ));
    }

    #[test]
    fn bad_aircraft_constants_are_rejected() {
        let (mut aircraft, limits) = c172();
        aircraft.empty_weight_lb = -1.0;
        assert!(matches!(
            solve(&[], &aircraft, &limits),
            Err(CalcError::Negative { field: "empty weight", .. })
        ));
        let (mut aircraft, mut limits) = c172();
        aircraft.burn_deduction_lb = f64::INFINITY;
        assert!(matches!(
            solve(&[], &aircraft, &limits),
            Err(CalcError::NonFinite { field: "burn deduction" })
        ));
        aircraft.burn_deduction_lb = 120.0;
        limits.aft_cg_in = f64::NAN;
        assert!(matches!(
            solve(&[], &aircraft, &limits),
            Err(CalcError::NonFinite { field: "aft CG limit" })
        ));
    }

    #[test]
    fn labels_map_to_kinds() {
        assert_eq!(RowKind::infer_from_label("Fuel (lbs)"), RowKind::Fuel);
        // "fuel" with no deduction word after it is fuel
        assert_eq!(RowKind::infer_from_label("Startup/Taxi fuel"), RowKind::Fuel);
        assert_eq!(RowKind::infer_from_label("Taxi fuel"), RowKind::Fuel);
        assert_eq!(RowKind::infer_from_label("Burn fuel"), RowKind::Fuel);
        assert_eq!(RowKind::infer_from_label("Fuel for taxi, fuel total"), RowKind::Fuel);
        assert_eq!(RowKind::infer_from_label("Fuel startup/taxi"), RowKind::StartupDeduction);
        assert_eq!(RowKind::infer_from_label("Runup"), RowKind::StartupDeduction);
        assert_eq!(RowKind::infer_from_label("Fuel burn"), RowKind::BurnDeduction);
        assert_eq!(RowKind::infer_from_label("Fuel en-route"), RowKind::BurnDeduction);
        assert_eq!(RowKind::infer_from_label("En-route"), RowKind::BurnDeduction);
        assert_eq!(RowKind::infer_from_label("Baggage"), RowKind::Payload);
        assert_eq!(LoadRow::from_label("Taxi", 8.0, 48.0).kind, RowKind::StartupDeduction);
    }
}

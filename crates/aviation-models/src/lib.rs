//! aviation-models
//!
//! Sample loading data for common training aircraft. Weights are in pounds,
//! arms in inches aft of the manufacturer's datum.
//!
//! Each profile carries what the weight & balance sheet needs up front:
//!   - basic empty weight and arm
//!   - full usable fuel weight and the fixed fuel arm
//!   - fixed arms printed on the ramp / takeoff / landing rows
//!   - startup/taxi and en-route burn deductions
//!   - maximum ramp weight and the forward/aft CG limits
//!
//! These are representative numbers for a typical airframe. Real loading
//! always starts from the aircraft's own weighing record.
//!
//! Exports:
//!   - `profile(id)`
//!   - `all_profiles()`

/// One aircraft's loading constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct AircraftProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub empty_weight_lb: f64,
    pub empty_arm_in: f64,
    pub fuel_weight_lb: f64,
    pub fuel_arm_in: f64,
    pub ramp_arm_in: f64,
    pub takeoff_arm_in: f64,
    pub landing_arm_in: f64,
    pub startup_deduction_lb: f64,
    pub burn_deduction_lb: f64,
    pub max_weight_lb: f64,
    pub forward_cg_in: f64,
    pub aft_cg_in: f64,
}

/// Profile selected when nothing else is chosen.
pub const DEFAULT_PROFILE_ID: &str = "c172";

/* ------------------------------ profiles ------------------------------- */
/* Fuel at 6 lb/US gal of usable avgas.                                    */

const PROFILES: &[AircraftProfile] = &[
    AircraftProfile {
        id: "c172",
        name: "Cessna 172S Skyhawk",
        empty_weight_lb: 1720.9,
        empty_arm_in: 41.9,
        fuel_weight_lb: 318.0,
        fuel_arm_in: 48.0,
        ramp_arm_in: 41.9,
        takeoff_arm_in: 41.9,
        landing_arm_in: 41.5,
        startup_deduction_lb: 8.0,
        burn_deduction_lb: 120.0,
        max_weight_lb: 2300.0,
        forward_cg_in: 35.0,
        aft_cg_in: 47.3,
    },
    AircraftProfile {
        id: "c152",
        name: "Cessna 152",
        empty_weight_lb: 1129.0,
        empty_arm_in: 30.7,
        fuel_weight_lb: 147.0,
        fuel_arm_in: 42.0,
        ramp_arm_in: 32.5,
        takeoff_arm_in: 32.5,
        landing_arm_in: 32.2,
        startup_deduction_lb: 5.0,
        burn_deduction_lb: 60.0,
        max_weight_lb: 1675.0,
        forward_cg_in: 31.0,
        aft_cg_in: 36.5,
    },
    AircraftProfile {
        id: "pa28-181",
        name: "Piper PA-28-181 Archer",
        empty_weight_lb: 1550.0,
        empty_arm_in: 86.5,
        fuel_weight_lb: 288.0,
        fuel_arm_in: 95.0,
        ramp_arm_in: 88.4,
        takeoff_arm_in: 88.4,
        landing_arm_in: 88.0,
        startup_deduction_lb: 7.0,
        burn_deduction_lb: 100.0,
        max_weight_lb: 2558.0,
        forward_cg_in: 82.0,
        aft_cg_in: 93.0,
    },
];

/// Look up a profile by id (case-insensitive).
pub fn profile(id: &str) -> Option<&'static AircraftProfile> {
    PROFILES.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

pub fn all_profiles() -> &'static [AircraftProfile] {
    PROFILES
}

/// The `c172` profile.
pub fn default_profile() -> &'static AircraftProfile {
    &PROFILES[0]
}

/* -------------------------------- tests -------------------------------- */

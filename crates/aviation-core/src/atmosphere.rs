//! Atmosphere
//!
//! Rule-of-thumb models used by flight computers and pilot training material.
//! None of these are the full ICAO standard atmosphere:
//! - ISA temperature falls a flat 2 °C per 1000 ft
//! - pressure altitude moves 1000 ft per inHg away from 29.92
//! - density altitude adds 120 ft per °C of ISA deviation
//! - true airspeed uses a power-law density ratio, `(1 - h/44330)^4.256`
//! - cloud base rises 1000 ft per 2.5 °C of temperature/dew point spread

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_range, Result};

pub const STANDARD_ALTIMETER_INHG: f64 = 29.92;
pub const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0;
/// °C per 1000 ft.
pub const ISA_LAPSE_RATE_C: f64 = 2.0;
/// Feet of density altitude per °C of ISA deviation.
pub const DENSITY_ALTITUDE_FT_PER_C: f64 = 120.0;
/// Temperature/dew point spread per 1000 ft of cloud base (°C).
pub const CLOUD_BASE_SPREAD_C_PER_1000FT: f64 = 2.5;

const KELVIN_OFFSET: f64 = 273.15;
/// Scale height and exponent of the TAS density-ratio approximation.
const DENSITY_SCALE_FT: f64 = 44330.0;
const DENSITY_EXPONENT: f64 = 4.256;

const ELEVATION_RANGE_FT: (f64, f64) = (-1000.0, 20000.0);
const OAT_RANGE_C: (f64, f64) = (-60.0, 60.0);
const ALTIMETER_RANGE_INHG: (f64, f64) = (28.0, 32.0);
/// Kept below the density fit's scale height, where the ratio reaches zero.
const TAS_ALTITUDE_RANGE_FT: (f64, f64) = (-2000.0, 44000.0);
const TAS_OAT_RANGE_C: (f64, f64) = (-100.0, 100.0);

/// ISA temperature at a pressure altitude (°C).
pub fn isa_temperature_c(pressure_altitude_ft: f64) -> f64 {
    ISA_SEA_LEVEL_TEMP_C - (pressure_altitude_ft / 1000.0) * ISA_LAPSE_RATE_C
}

/// Pressure altitude from field elevation and altimeter setting.
pub fn pressure_altitude_ft(field_elevation_ft: f64, altimeter_inhg: f64) -> f64 {
    field_elevation_ft + (STANDARD_ALTIMETER_INHG - altimeter_inhg) * 1000.0
}

/// -------------------------
/// Density altitude
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityAltitudeInput {
    pub field_elevation_ft: f64,
    pub oat_c: f64,
    pub altimeter_inhg: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityAltitudeResult {
    pub pressure_altitude_ft: f64,
    pub density_altitude_ft: f64,
    /// Positive when warmer than standard.
    pub isa_deviation_c: f64,
}

impl DensityAltitudeInput {
    /// Checks elevation, temperature and altimeter in that order and reports
    /// only the first field out of range.
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = ELEVATION_RANGE_FT;
        ensure_range("airport elevation", self.field_elevation_ft, lo, hi, "ft")?;
        let (lo, hi) = OAT_RANGE_C;
        ensure_range("temperature", self.oat_c, lo, hi, "°C")?;
        let (lo, hi) = ALTIMETER_RANGE_INHG;
        ensure_range("altimeter setting", self.altimeter_inhg, lo, hi, "inHg")?;
        Ok(())
    }
}

pub fn density_altitude(input: &DensityAltitudeInput) -> Result<DensityAltitudeResult> {
    input.validate()?;

    let pressure_altitude = pressure_altitude_ft(input.field_elevation_ft, input.altimeter_inhg);
    let isa_temp = isa_temperature_c(pressure_altitude);
    let isa_deviation = input.oat_c - isa_temp;
    let density_altitude = pressure_altitude + DENSITY_ALTITUDE_FT_PER_C * isa_deviation;

    tracing::trace!(pressure_altitude, density_altitude, isa_deviation, "density altitude");

    Ok(DensityAltitudeResult {
        pressure_altitude_ft: pressure_altitude,
        density_altitude_ft: density_altitude,
        isa_deviation_c: isa_deviation,
    })
}

/// -------------------------
/// True airspeed
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrueAirspeedInput {
    pub indicated_airspeed_kt: f64,
    pub pressure_altitude_ft: f64,
    pub oat_c: f64,
}

/// Approximate true airspeed [kt] from indicated airspeed, pressure altitude
/// and outside air temperature.
///
/// `TAS = IAS * sqrt(temp_ratio / density_ratio)` where `temp_ratio` compares
/// OAT with the ISA temperature in kelvin and `density_ratio` is the power-law
/// fit above.
pub fn true_airspeed(input: &TrueAirspeedInput) -> Result<f64> {
    let ias = ensure_non_negative("indicated airspeed", input.indicated_airspeed_kt)?;
    let (lo, hi) = TAS_ALTITUDE_RANGE_FT;
    let pa = ensure_range("pressure altitude", input.pressure_altitude_ft, lo, hi, "ft")?;
    let (lo, hi) = TAS_OAT_RANGE_C;
    let oat = ensure_range("temperature", input.oat_c, lo, hi, "°C")?;

    let temp_ratio = (oat + KELVIN_OFFSET) / (isa_temperature_c(pa) + KELVIN_OFFSET);
    let density_ratio = (1.0 - pa / DENSITY_SCALE_FT).powf(DENSITY_EXPONENT);
    Ok(ias * (temp_ratio / density_ratio).sqrt())
}

/// -------------------------
/// Cloud base
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudBaseInput {
    pub temperature_c: f64,
    pub dew_point_c: f64,
}

/// Estimated convective cloud base [ft AGL].
///
/// Negative when the dew point is above the temperature; the caller decides
/// how to flag saturated air, the value is never clamped.
pub fn cloud_base_ft_agl(input: &CloudBaseInput) -> Result<f64> {
    let t = ensure_finite("temperature", input.temperature_c)?;
    let td = ensure_finite("dew point", input.dew_point_c)?;
    Ok((t - td) / CLOUD_BASE_SPREAD_C_PER_1000FT * 1000.0)
}

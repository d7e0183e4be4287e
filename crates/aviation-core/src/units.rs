//! Units & conversions
//!
//! Distance conversions go through `uom` length quantities, so the factors are
//! the exact SI definitions (1 nm = 1852 m, 1 sm = 1609.344 m, 1 ft = 0.3048 m).

use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::{foot, kilometer, mile, nautical_mile};

use crate::error::{ensure_finite, Result};

pub fn deg_to_rad(deg: f64) -> f64 { deg.to_radians() }
pub fn rad_to_deg(rad: f64) -> f64 { rad.to_degrees() }

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub fn nm_to_sm(nm: f64) -> f64 { Length::new::<nautical_mile>(nm).get::<mile>() }
pub fn nm_to_km(nm: f64) -> f64 { Length::new::<nautical_mile>(nm).get::<kilometer>() }
pub fn nm_to_ft(nm: f64) -> f64 { Length::new::<nautical_mile>(nm).get::<foot>() }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    NauticalMiles,
    StatuteMiles,
    Kilometers,
    Feet,
}

impl DistanceUnit {
    /// Short label used on the conversion card ("nm", "sm", "km", "ft").
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::NauticalMiles => "nm",
            DistanceUnit::StatuteMiles => "sm",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Feet => "ft",
        }
    }

    fn length(self, value: f64) -> Length {
        match self {
            DistanceUnit::NauticalMiles => Length::new::<nautical_mile>(value),
            DistanceUnit::StatuteMiles => Length::new::<mile>(value),
            DistanceUnit::Kilometers => Length::new::<kilometer>(value),
            DistanceUnit::Feet => Length::new::<foot>(value),
        }
    }
}

/// One distance expressed in every unit the navigation tools show.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceConversions {
    pub nautical_miles: f64,
    pub statute_miles: f64,
    pub kilometers: f64,
    pub feet: f64,
}

pub fn convert_distance(value: f64, from: DistanceUnit) -> Result<DistanceConversions> {
    let value = ensure_finite("distance", value)?;
    let length = from.length(value);
    Ok(DistanceConversions {
        nautical_miles: length.get::<nautical_mile>(),
        statute_miles: length.get::<mile>(),
        kilometers: length.get::<kilometer>(),
        feet: length.get::<foot>(),
    })
}

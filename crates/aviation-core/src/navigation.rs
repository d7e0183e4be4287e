//! Great-circle navigation on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};
use crate::units::{deg_to_rad, normalize_degrees, rad_to_deg};

/// Mean Earth radius [nm].
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Two positions in decimal degrees (north and east positive).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GreatCircleInput {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl GreatCircleInput {
    /// The same leg flown the other way.
    pub fn reversed(self) -> Self {
        Self { lat1: self.lat2, lon1: self.lon2, lat2: self.lat1, lon2: self.lon1 }
    }

    fn radians(&self) -> Result<(f64, f64, f64, f64)> {
        Ok((
            deg_to_rad(ensure_finite("latitude 1", self.lat1)?),
            deg_to_rad(ensure_finite("longitude 1", self.lon1)?),
            deg_to_rad(ensure_finite("latitude 2", self.lat2)?),
            deg_to_rad(ensure_finite("longitude 2", self.lon2)?),
        ))
    }
}

/// Haversine distance [nm].
pub fn great_circle_distance_nm(input: &GreatCircleInput) -> Result<f64> {
    let (lat1, lon1, lat2, lon2) = input.radians()?;
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Ok(EARTH_RADIUS_NM * c)
}

/// Initial true bearing from point 1 toward point 2, in [0, 360).
///
/// Meaningless (returns 0) when both points coincide.
pub fn initial_bearing_deg(input: &GreatCircleInput) -> Result<f64> {
    let (lat1, lon1, lat2, lon2) = input.radians()?;
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    Ok(normalize_degrees(rad_to_deg(y.atan2(x))))
}

/// True bearing on arrival at point 2, in [0, 360).
pub fn final_bearing_deg(input: &GreatCircleInput) -> Result<f64> {
    let back = initial_bearing_deg(&input.reversed())?;
    Ok(normalize_degrees(back + 180.0))
}

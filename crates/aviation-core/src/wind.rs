//! Wind
//!
//! Wind triangle (heading and ground speed for a desired course) and runway
//! crosswind/headwind decomposition.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ensure_range, CalcError, Result};
use crate::units::{deg_to_rad, normalize_degrees, rad_to_deg};

fn ensure_direction(field: &'static str, deg: f64) -> Result<f64> {
    // 360 is how pilots write north; normalize_degrees folds it to 0 later
    ensure_range(field, deg, 0.0, 360.0, "°")
}

/// -------------------------
/// Wind triangle
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindTriangleInput {
    pub true_airspeed_kt: f64,
    /// Direction the wind blows from.
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
    pub true_course_deg: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindTriangleResult {
    pub ground_speed_kt: f64,
    /// Positive = crab right of course.
    pub wind_correction_angle_deg: f64,
    /// Course plus correction angle, in [0, 360). No variation is applied.
    pub magnetic_heading_deg: f64,
}

impl WindTriangleResult {
    /// Flight computer display precision: ground speed to 1 kt, WCA to 0.1°,
    /// heading to 1°.
    pub fn rounded(self) -> Self {
        Self {
            ground_speed_kt: self.ground_speed_kt.round(),
            wind_correction_angle_deg: (self.wind_correction_angle_deg * 10.0).round() / 10.0,
            magnetic_heading_deg: normalize_degrees(self.magnetic_heading_deg.round()),
        }
    }
}

/// Solve the wind triangle at full precision.
///
/// ```text
/// wa  = wind_dir - course
/// wca = asin(ws * sin(wa) / tas)
/// gs  = sqrt(tas² + ws² - 2·tas·ws·cos(π - wa))
/// hdg = course + wca
/// ```
///
/// The ground-speed law of cosines is kept in this exact form, so wind from
/// directly behind the course (wa = 180°) comes out as `tas - ws`.
pub fn solve_wind_triangle(input: &WindTriangleInput) -> Result<WindTriangleResult> {
    let tas = ensure_positive("true airspeed", input.true_airspeed_kt)?;
    let wd = deg_to_rad(ensure_direction("wind direction", input.wind_direction_deg)?);
    let ws = ensure_non_negative("wind speed", input.wind_speed_kt)?;
    let tc = deg_to_rad(ensure_direction("true course", input.true_course_deg)?);

    let wind_angle = wd - tc;
    let ratio = ws * wind_angle.sin() / tas;
    if ratio.abs() > 1.0 {
        tracing::warn!(tas, ws, ratio, "crosswind component exceeds true airspeed");
        return Err(CalcError::UnsolvableGeometry { ratio });
    }

    let wca = ratio.asin();
    let gs = (tas * tas + ws * ws - 2.0 * tas * ws * (PI - wind_angle).cos()).sqrt();
    let heading = normalize_degrees(rad_to_deg(tc + wca));

    tracing::trace!(gs, wca = rad_to_deg(wca), heading, "wind triangle");

    Ok(WindTriangleResult {
        ground_speed_kt: gs,
        wind_correction_angle_deg: rad_to_deg(wca),
        magnetic_heading_deg: heading,
    })
}

/// -------------------------
/// Runway crosswind
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrosswindInput {
    pub runway_heading_deg: f64,
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosswindSide {
    Left,
    Right,
    /// Crosswind rounds to 0 kt.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrosswindResult {
    /// Always >= 0; the side says where it comes from.
    pub crosswind_component_kt: f64,
    /// Negative = tailwind.
    pub headwind_component_kt: f64,
    pub crosswind_side: CrosswindSide,
}

impl CrosswindResult {
    /// Whole knots, as read off a crosswind chart.
    pub fn rounded(self) -> Self {
        Self {
            crosswind_component_kt: self.crosswind_component_kt.round(),
            headwind_component_kt: self.headwind_component_kt.round(),
            crosswind_side: self.crosswind_side,
        }
    }
}

/// Resolve a wind into runway components.
///
/// The angle between runway and wind is folded into [0, 180] before taking
/// `sin`/`cos`. The side comes from the clockwise angle runway → wind: more
/// than 180° means the wind is on the left.
pub fn resolve_crosswind(input: &CrosswindInput) -> Result<CrosswindResult> {
    let runway = ensure_direction("runway heading", input.runway_heading_deg)?;
    let wind_dir = ensure_direction("wind direction", input.wind_direction_deg)?;
    let ws = ensure_non_negative("wind speed", input.wind_speed_kt)?;

    let mut angle = (runway - wind_dir).abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    let angle = deg_to_rad(angle);

    let crosswind = (ws * angle.sin()).abs();
    let headwind = ws * angle.cos();

    let crosswind_side = if crosswind.round() == 0.0 {
        CrosswindSide::None
    } else if (wind_dir - runway + 360.0) % 360.0 > 180.0 {
        CrosswindSide::Left
    } else {
        CrosswindSide::Right
    };

    Ok(CrosswindResult {
        crosswind_component_kt: crosswind,
        headwind_component_kt: headwind,
        crosswind_side,
    })
}

//! Planning arithmetic: time/speed/distance, fuel, UTC offsets and the
//! `H:MM` strings used on nav logs and logbooks.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ensure_range, CalcError, Result};

/// Whole-hour offsets in use around the world span UTC-12 to UTC+14.
const UTC_OFFSET_RANGE_HR: (f64, f64) = (-12.0, 14.0);

/// -------------------------
/// Time / speed / distance
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TsdTarget {
    Distance,
    Time,
    Speed,
}

/// Any two of the three; the third is solved for. Time is in hours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpeedDistanceInput {
    pub time_hr: Option<f64>,
    pub speed_kt: Option<f64>,
    pub distance_nm: Option<f64>,
}

fn required(field: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or(CalcError::MissingInput { field })
}

/// `distance = speed × time`, solved for `target`.
pub fn solve_time_speed_distance(input: &TimeSpeedDistanceInput, target: TsdTarget) -> Result<f64> {
    match target {
        TsdTarget::Distance => {
            let time = ensure_non_negative("time", required("time", input.time_hr)?)?;
            let speed = ensure_non_negative("speed", required("speed", input.speed_kt)?)?;
            Ok(time * speed)
        }
        TsdTarget::Time => {
            let distance = required("distance", input.distance_nm)?;
            let distance = ensure_non_negative("distance", distance)?;
            let speed = ensure_positive("speed", required("speed", input.speed_kt)?)?;
            Ok(distance / speed)
        }
        TsdTarget::Speed => {
            let distance = required("distance", input.distance_nm)?;
            let distance = ensure_non_negative("distance", distance)?;
            let time = ensure_positive("time", required("time", input.time_hr)?)?;
            Ok(distance / time)
        }
    }
}

/// -------------------------
/// Fuel
/// -------------------------

/// Blank fields simply leave the dependent outputs empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPlanInput {
    pub fuel_flow_gph: Option<f64>,
    pub time_hr: Option<f64>,
    pub distance_nm: Option<f64>,
    pub speed_kt: Option<f64>,
    pub fuel_on_board_gal: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPlan {
    /// flow × time
    pub fuel_required_gal: Option<f64>,
    /// distance ÷ speed
    pub time_en_route_hr: Option<f64>,
    /// flow ÷ speed
    pub gallons_per_nm: Option<f64>,
    /// fuel on board ÷ flow
    pub endurance_hr: Option<f64>,
}

pub fn solve_fuel_plan(input: &FuelPlanInput) -> Result<FuelPlan> {
    let flow = input.fuel_flow_gph.map(|v| ensure_non_negative("fuel flow", v)).transpose()?;
    let time = input.time_hr.map(|v| ensure_non_negative("time", v)).transpose()?;
    let distance = input.distance_nm.map(|v| ensure_non_negative("distance", v)).transpose()?;
    let speed = input.speed_kt.map(|v| ensure_positive("speed", v)).transpose()?;
    let fob = input
        .fuel_on_board_gal
        .map(|v| ensure_non_negative("fuel on board", v))
        .transpose()?;

    Ok(FuelPlan {
        fuel_required_gal: flow.zip(time).map(|(f, t)| f * t),
        time_en_route_hr: distance.zip(speed).map(|(d, s)| d / s),
        gallons_per_nm: flow.zip(speed).map(|(f, s)| f / s),
        endurance_hr: fob.zip(flow.filter(|f| *f > 0.0)).map(|(q, f)| q / f),
    })
}

/// -------------------------
/// Clock strings
/// -------------------------

/// Convert a UTC clock time `HH:MM` to local time with an hour offset
/// (fractional offsets such as +5.5 allowed). Wraps around midnight.
pub fn utc_to_local(utc: &str, offset_hr: f64) -> Result<String> {
    let (lo, hi) = UTC_OFFSET_RANGE_HR;
    let offset_hr = ensure_range("UTC offset", offset_hr, lo, hi, "h")?;
    let time = NaiveTime::parse_from_str(utc.trim(), "%H:%M")
        .map_err(|_| CalcError::InvalidTime(utc.to_owned()))?;

    #[allow(clippy::cast_possible_truncation)]
    let offset_min = (offset_hr * 60.0).floor() as i64;
    let (local, _days) = time.overflowing_add_signed(Duration::minutes(offset_min));
    Ok(format!("{:02}:{:02}", local.hour(), local.minute()))
}

/// Decimal hours as `H:MM` (1.5 → "1:30"). Negative or NaN totals show as "0:00".
pub fn format_flight_time(hours: f64) -> String {
    let hours = hours.max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_min = (hours * 60.0).round() as u64;
    format!("{}:{:02}", total_min / 60, total_min % 60)
}

/// Parse an elapsed time `H:MM` into minutes. Minutes must be below 60.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let (h, m) = text.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if m >= 60 {
        return None;
    }
    h.checked_mul(60)?.checked_add(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tsd_solves_each_unknown() {
        let input = TimeSpeedDistanceInput {
            time_hr: Some(1.5),
            speed_kt: Some(120.0),
            distance_nm: Some(90.0),
        };
        assert_relative_eq!(solve_time_speed_distance(&input, TsdTarget::Distance).unwrap(), 180.0);
        assert_relative_eq!(solve_time_speed_distance(&input, TsdTarget::Time).unwrap(), 0.75);
        assert_relative_eq!(solve_time_speed_distance(&input, TsdTarget::Speed).unwrap(), 60.0);
    }

    #[test]
    fn tsd_reports_missing_and_zero_divisors() {
        let input = TimeSpeedDistanceInput { speed_kt: Some(0.0), distance_nm: Some(10.0), ..Default::default() };
        assert!(matches!(
            solve_time_speed_distance(&input, TsdTarget::Time),
            Err(CalcError::NotPositive { field: "speed", .. })
        ));
        assert_eq!(
            solve_time_speed_distance(&input, TsdTarget::Speed),
            Err(CalcError::MissingInput { field: "time" })
        );
    }

    #[test]
    fn fuel_plan_fills_what_it_can() {
        let plan = solve_fuel_plan(&FuelPlanInput {
            fuel_flow_gph: Some(8.5),
            time_hr: Some(2.0),
            distance_nm: Some(230.0),
            speed_kt: Some(115.0),
            fuel_on_board_gal: Some(53.0),
        })
        .unwrap();
        assert_relative_eq!(plan.fuel_required_gal.unwrap(), 17.0);
        assert_relative_eq!(plan.time_en_route_hr.unwrap(), 2.0);
        assert_relative_eq!(plan.gallons_per_nm.unwrap(), 8.5 / 115.0);
        assert_relative_eq!(plan.endurance_hr.unwrap(), 53.0 / 8.5);

        let partial = solve_fuel_plan(&FuelPlanInput { fuel_flow_gph: Some(8.5), ..Default::default() }).unwrap();
        assert_eq!(partial, FuelPlan::default());
    }

    #[test]
    fn fuel_plan_rejects_zero_speed() {
        let err = solve_fuel_plan(&FuelPlanInput { speed_kt: Some(0.0), ..Default::default() }).unwrap_err();
        assert!(matches!(err, CalcError::NotPositive { field: "speed", .. }));
    }

    #[test]
    fn utc_offsets_wrap_midnight() {
        assert_eq!(utc_to_local("14:30", -5.0).unwrap(), "09:30");
        assert_eq!(utc_to_local("02:15", -8.0).unwrap(), "18:15");
        assert_eq!(utc_to_local("22:00", 5.5).unwrap(), "03:30");
        assert_eq!(utc_to_local("23:59", 0.0).unwrap(), "23:59");
    }

    #[test]
    fn utc_conversion_rejects_garbage() {
        assert!(matches!(utc_to_local("25:00", 1.0), Err(CalcError::InvalidTime(_))));
        assert!(matches!(utc_to_local("noon", 1.0), Err(CalcError::InvalidTime(_))));
        assert!(utc_to_local("12:00", 15.0).is_err());
    }

    #[test]
    fn flight_time_strings() {
        assert_eq!(format_flight_time(1.5), "1:30");
        assert_eq!(format_flight_time(0.1), "0:06");
        assert_eq!(format_flight_time(12.0), "12:00");
        // 1.999 h is 119.94 min; rounds up to the next hour instead of "1:60"
        assert_eq!(format_flight_time(1.999), "2:00");
        assert_eq!(format_flight_time(f64::NAN), "0:00");
    }

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration_minutes("1:45"), Some(105));
        assert_eq!(parse_duration_minutes(" 0:05 "), Some(5));
        assert_eq!(parse_duration_minutes("1:75"), None);
        assert_eq!(parse_duration_minutes("145"), None);
        assert_eq!(parse_duration_minutes(""), None);
    }
}

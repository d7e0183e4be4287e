//! Core flight computer math
//!
//! Includes:
//! - Units & conversions (angles, nm/sm/km/ft)
//! - Atmosphere: pressure/density altitude, true airspeed, cloud base
//! - Wind: wind triangle and runway crosswind/headwind components
//! - Navigation: great-circle distance and bearing
//! - Planning: time/speed/distance, fuel, UTC offsets, logbook time strings
//!
//! Every function is pure and synchronous. Inputs are already-parsed scalars;
//! string handling belongs to the caller except where a function documents a
//! time string format.

pub mod atmosphere;
pub mod error;
pub mod navigation;
pub mod planning;
pub mod units;
pub mod wind;

pub use atmosphere::{
    cloud_base_ft_agl, density_altitude, isa_temperature_c, pressure_altitude_ft, true_airspeed,
    CloudBaseInput, DensityAltitudeInput, DensityAltitudeResult, TrueAirspeedInput,
};
pub use error::{CalcError, Result};
pub use navigation::{
    final_bearing_deg, great_circle_distance_nm, initial_bearing_deg, GreatCircleInput,
    EARTH_RADIUS_NM,
};
pub use planning::{
    format_flight_time, parse_duration_minutes, solve_fuel_plan, solve_time_speed_distance,
    utc_to_local, FuelPlan, FuelPlanInput, TimeSpeedDistanceInput, TsdTarget,
};
pub use units::{convert_distance, normalize_degrees, DistanceConversions, DistanceUnit};
pub use wind::{
    resolve_crosswind, solve_wind_triangle, CrosswindInput, CrosswindResult, CrosswindSide,
    WindTriangleInput, WindTriangleResult,
};

//! VFR navigation log.
//!
//! A sheet of checkpoints from DEPARTURE to DESTINATION. Cells hold the text
//! the pilot typed, so a half-filled sheet is always representable; numbers
//! are read out of the cells only when totals or a leg solution are needed.
//! Blank or unreadable numeric cells count as zero in totals.

use aviation_core::{
    normalize_degrees, solve_wind_triangle, Result as CalcResult, WindTriangleInput,
    WindTriangleResult,
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reserve below this many gallons is flagged.
pub const LOW_RESERVE_GAL: f64 = 10.0;

const DEPARTURE: &str = "DEPARTURE";
const DESTINATION: &str = "DESTINATION";
const EN_ROUTE: &str = "EN ROUTE";

/// One row of the nav log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checkpoint {
    pub id: String,
    pub name: String,
    pub true_course: String,
    pub altitude: String,
    pub wind_direction: String,
    pub wind_velocity: String,
    pub temperature: String,
    #[serde(rename = "planTAS")]
    pub plan_tas: String,
    /// -L +R
    pub wind_correction: String,
    pub true_heading: String,
    /// -E +W
    pub variation: String,
    pub mag_heading: String,
    pub deviation: String,
    pub compass_heading: String,
    pub distance: String,
    pub remaining: String,
    pub ground_speed: String,
    pub est: String,
    pub act: String,
    pub ete: String,
    pub ate: String,
    pub eta: String,
    pub ata: String,
    pub fuel_used: String,
    pub fuel_remaining: String,
    pub vor_freq: String,
    pub vor_radial: String,
    pub vor_ident: String,
}

impl Checkpoint {
    fn named(id: String, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), ..Self::default() }
    }
}

/// Header of the sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightInfo {
    pub aircraft: String,
    pub tail_number: String,
    pub pilot: String,
    pub departure: String,
    pub destination: String,
    pub route: String,
    pub altitude: String,
    pub airspeed: String,
    /// Gallons.
    pub fuel_on_board: String,
    pub alternate_airport: String,
    pub remarks: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTotals {
    #[serde(rename = "totalDistance")]
    pub total_distance_nm: f64,
    /// Minutes, read from the last checkpoint's ETA.
    #[serde(rename = "totalETE")]
    pub total_ete_min: f64,
    #[serde(rename = "totalFuelUsed")]
    pub total_fuel_used_gal: f64,
    /// Needs fuel on board.
    pub fuel_reserve_gal: Option<f64>,
    pub low_reserve: bool,
    /// Reserve ÷ average burn per minute; needs fuel used and ETE.
    pub reserve_minutes: Option<f64>,
    pub average_ground_speed_kt: Option<f64>,
    pub burn_rate_gph: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub info: FlightInfo,
    checkpoints: Vec<Checkpoint>,
    next_id: u64,
}

impl Default for FlightPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightPlan {
    /// DEPARTURE, CHECKPOINT 1, DESTINATION.
    pub fn new() -> Self {
        Self {
            info: FlightInfo::default(),
            checkpoints: vec![
                Checkpoint::named("1".into(), DEPARTURE),
                Checkpoint::named("2".into(), "CHECKPOINT 1"),
                Checkpoint::named("3".into(), DESTINATION),
            ],
            next_id: 4,
        }
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn checkpoint_mut(&mut self, id: &str) -> Option<&mut Checkpoint> {
        self.checkpoints.iter_mut().find(|c| c.id == id)
    }

    /// Insert a blank checkpoint just before the destination.
    ///
    /// The first en-route point is "EN ROUTE"; adding a second renames it
    /// "CHECKPOINT 1" and names the new one "CHECKPOINT 2".
    pub fn add_checkpoint(&mut self) -> &Checkpoint {
        let en_route = self.checkpoints.len().saturating_sub(2);
        let name = match en_route {
            0 => EN_ROUTE.to_owned(),
            1 => {
                self.checkpoints[1].name = "CHECKPOINT 1".into();
                "CHECKPOINT 2".to_owned()
            }
            n => format!("CHECKPOINT {}", n + 1),
        };
        let id = self.fresh_id();
        let at = self.checkpoints.len().saturating_sub(1);
        self.checkpoints.insert(at, Checkpoint::named(id, name));
        &self.checkpoints[at]
    }

    /// Remove a checkpoint and renumber. The sheet never drops below two rows;
    /// returns false when nothing was removed.
    pub fn remove_checkpoint(&mut self, id: &str) -> bool {
        if self.checkpoints.len() <= 2 {
            return false;
        }
        let Some(at) = self.checkpoints.iter().position(|c| c.id == id) else {
            return false;
        };
        self.checkpoints.remove(at);
        self.renumber();
        true
    }

    pub fn totals(&self) -> PlanTotals {
        let distance: f64 = self.checkpoints.iter().map(|c| cell_number(&c.distance)).sum();
        let fuel_used: f64 = self.checkpoints.iter().map(|c| cell_number(&c.fuel_used)).sum();
        let ete = self.checkpoints.last().map_or(0.0, |c| clock_minutes(&c.eta));

        let fob = cell_option(&self.info.fuel_on_board);
        let remaining = fob.map(|f| f - fuel_used);
        let reserve = remaining.map(|r| r.max(0.0));
        let flown = fuel_used > 0.0 && ete > 0.0;
        let reserve_minutes = reserve.filter(|_| flown).map(|r| r / (fuel_used / ete));

        PlanTotals {
            total_distance_nm: distance,
            total_ete_min: ete,
            total_fuel_used_gal: fuel_used,
            fuel_reserve_gal: reserve,
            low_reserve: remaining.is_some_and(|r| r < LOW_RESERVE_GAL),
            reserve_minutes,
            average_ground_speed_kt: (distance > 0.0 && ete > 0.0).then(|| distance / (ete / 60.0)),
            burn_rate_gph: flown.then(|| fuel_used / (ete / 60.0)),
        }
    }

    /// Work the wind triangle for one checkpoint from its TC, wind and TAS
    /// cells, writing WCA, true heading and ground speed back. Magnetic and
    /// compass heading follow when variation and deviation are filled in.
    ///
    /// `Ok(None)` when the row lacks an input or the id is unknown.
    pub fn solve_leg(&mut self, id: &str) -> CalcResult<Option<WindTriangleResult>> {
        let Some(cp) = self.checkpoint_mut(id) else {
            return Ok(None);
        };
        let (Some(tc), Some(wd), Some(ws), Some(tas)) = (
            cell_option(&cp.true_course),
            cell_option(&cp.wind_direction),
            cell_option(&cp.wind_velocity),
            cell_option(&cp.plan_tas),
        ) else {
            return Ok(None);
        };

        let solved = solve_wind_triangle(&WindTriangleInput {
            true_airspeed_kt: tas,
            wind_direction_deg: wd,
            wind_speed_kt: ws,
            true_course_deg: tc,
        })?
        .rounded();

        // + 0.0 folds a -0.0 correction into "+0.0"
        cp.wind_correction = format!("{:+.1}", solved.wind_correction_angle_deg + 0.0);
        cp.true_heading = heading_cell(solved.magnetic_heading_deg);
        cp.ground_speed = format!("{:.0}", solved.ground_speed_kt);

        if let Some(var) = cell_option(&cp.variation) {
            let mh = normalize_degrees(solved.magnetic_heading_deg + var);
            cp.mag_heading = heading_cell(mh);
            if let Some(dev) = cell_option(&cp.deviation) {
                cp.compass_heading = heading_cell(normalize_degrees(mh + dev));
            }
        }
        Ok(Some(solved))
    }

    /// Pretty JSON of `{ flightInfo, checkpoints, totals, generatedAt }`.
    pub fn to_json(&self, generated_at: DateTime<Utc>) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Export<'a> {
            flight_info: &'a FlightInfo,
            checkpoints: &'a [Checkpoint],
            totals: PlanTotals,
            generated_at: String,
        }

        Ok(serde_json::to_string_pretty(&Export {
            flight_info: &self.info,
            checkpoints: &self.checkpoints,
            totals: self.totals(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })?)
    }

    pub fn export_file_name(&self, date: NaiveDate) -> String {
        let tail = self.info.tail_number.trim();
        let tail = if tail.is_empty() { "unknown" } else { tail };
        format!("flight-plan-{tail}-{}.json", date.format("%Y-%m-%d"))
    }

    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn renumber(&mut self) {
        let last = self.checkpoints.len() - 1;
        let single_en_route = self.checkpoints.len() == 3;
        for (i, cp) in self.checkpoints.iter_mut().enumerate() {
            cp.name = if i == 0 {
                DEPARTURE.to_owned()
            } else if i == last {
                DESTINATION.to_owned()
            } else if single_en_route {
                EN_ROUTE.to_owned()
            } else {
                format!("CHECKPOINT {i}")
            };
        }
    }
}

/* ------------------------------- internals ------------------------------- */

fn cell_option(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell_number(text: &str) -> f64 {
    cell_option(text).unwrap_or(0.0)
}

/// "H:MM" as minutes; either half may be blank. Anything else is zero.
fn clock_minutes(text: &str) -> f64 {
    match text.split(':').collect::<Vec<_>>().as_slice() {
        [h, m] => cell_number(h) * 60.0 + cell_number(m),
        _ => 0.0,
    }
}

fn heading_cell(deg: f64) -> String {
    format!("{:03.0}", normalize_degrees(deg.round()))
}

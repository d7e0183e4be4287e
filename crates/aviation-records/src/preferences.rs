//! User preferences, persisted as one JSON object.
//!
//! Loading never fails: a missing or unreadable blob gives the defaults, and
//! an aircraft id no longer in the profile list falls back to the default
//! profile.

use aviation_core::DistanceUnit;
use aviation_models::{profile, AircraftProfile, DEFAULT_PROFILE_ID};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::KeyValueStore;

pub const PREFERENCES_KEY: &str = "aviationProPreferences";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub aircraft_profile: String,
    pub distance_unit: DistanceUnit,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            aircraft_profile: DEFAULT_PROFILE_ID.to_owned(),
            distance_unit: DistanceUnit::default(),
        }
    }
}

impl Preferences {
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Self {
        let Some(blob) = store.get(PREFERENCES_KEY) else {
            return Self::default();
        };
        let mut prefs: Self = match serde_json::from_str(&blob) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable preferences, using defaults");
                return Self::default();
            }
        };
        if profile(&prefs.aircraft_profile).is_none() {
            tracing::warn!(id = %prefs.aircraft_profile, "unknown aircraft profile, using default");
            prefs.aircraft_profile = DEFAULT_PROFILE_ID.to_owned();
        }
        prefs
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<()> {
        store.set(PREFERENCES_KEY, serde_json::to_string(self)?);
        Ok(())
    }

    /// The selected profile, or the default one.
    pub fn profile(&self) -> &'static AircraftProfile {
        profile(&self.aircraft_profile).unwrap_or_else(aviation_models::default_profile)
    }
}

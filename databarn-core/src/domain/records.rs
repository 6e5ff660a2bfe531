//! Race-book records: the relational rows win facts are derived from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{HorseId, JockeyId, RaceId, RunningId, TrainerId};

/// A horse. A sire is a horse referenced by another horse's `sire_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub id: HorseId,
    pub name: String,
    #[serde(default)]
    pub sire_id: Option<HorseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jockey {
    pub id: JockeyId,
    #[serde(default)]
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    #[serde(default)]
    pub first_name: String,
    pub last_name: String,
}

/// A race template: type code, distance and surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    /// Race-type code, e.g. "MSW", "CLM", "STK".
    #[serde(rename = "type")]
    pub race_type: String,
    /// Distance in furlongs.
    pub distance: f64,
    /// Surface label, e.g. "Turf", "Polytrack", "Dirt".
    pub surface: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One running of a race on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Running {
    pub id: RunningId,
    pub race_id: RaceId,
    pub date: NaiveDate,
    /// `None` while the result has not been recorded.
    #[serde(default)]
    pub winner_id: Option<HorseId>,
}

/// A horse's entry in one running, with the people attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub horse_id: HorseId,
    pub running_id: RunningId,
    #[serde(default)]
    pub jockey_id: Option<JockeyId>,
    #[serde(default)]
    pub trainer_id: Option<TrainerId>,
}

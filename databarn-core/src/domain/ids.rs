use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier of a horse (sires are horses too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HorseId(pub u32);

/// Row identifier of a jockey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JockeyId(pub u32);

/// Row identifier of a trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainerId(pub u32);

/// Row identifier of a race (the template: type, distance, surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(pub u32);

/// Row identifier of one running of a race on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunningId(pub u32);

macro_rules! impl_id_display {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )*
    };
}

impl_id_display! {
    HorseId => "horse",
    JockeyId => "jockey",
    TrainerId => "trainer",
    RaceId => "race",
    RunningId => "running",
}

//! Domain types for databarn

pub mod fact;
pub mod ids;
pub mod party;
pub mod records;

pub use fact::{MalformedFact, RawWinRow, WinFact};
pub use ids::{HorseId, JockeyId, RaceId, RunningId, TrainerId};
pub use party::{ParsePartyTypeError, PartyKey, PartyType};
pub use records::{Entry, Horse, Jockey, Race, Running, Trainer};

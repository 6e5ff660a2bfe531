//! Win facts: one party's win count within one slice.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::party::PartyKey;

/// A row exactly as a fact source returns it, before validation.
///
/// The count is signed so that a misbehaving source can be detected
/// instead of silently wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWinRow {
    pub identity: PartyKey,
    pub wins: i64,
}

impl RawWinRow {
    pub fn new(identity: PartyKey, wins: i64) -> Self {
        Self { identity, wins }
    }
}

/// A validated win count for one party.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinFact {
    pub identity: PartyKey,
    pub win_count: u32,
}

impl WinFact {
    pub fn new(identity: PartyKey, win_count: u32) -> Self {
        Self {
            identity,
            win_count,
        }
    }
}

/// A fact that violates the grouping precondition of the ranker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFact {
    #[error("negative win count {wins} for '{identity}'")]
    NegativeWinCount { identity: PartyKey, wins: i64 },

    #[error("win count {wins} for '{identity}' exceeds the supported range")]
    WinCountOverflow { identity: PartyKey, wins: i64 },

    #[error("identity '{identity}' appears more than once in one result set")]
    DuplicateIdentity { identity: PartyKey },
}

impl TryFrom<RawWinRow> for WinFact {
    type Error = MalformedFact;

    fn try_from(row: RawWinRow) -> Result<Self, Self::Error> {
        if row.wins < 0 {
            return Err(MalformedFact::NegativeWinCount {
                identity: row.identity,
                wins: row.wins,
            });
        }
        match u32::try_from(row.wins) {
            Ok(win_count) => Ok(WinFact::new(row.identity, win_count)),
            Err(_) => Err(MalformedFact::WinCountOverflow {
                identity: row.identity,
                wins: row.wins,
            }),
        }
    }
}

//! Parties being ranked and their opaque identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three categories of party a leaderboard can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Sires,
    Jockeys,
    Trainers,
}

impl PartyType {
    /// Every party type, in dashboard order.
    pub const ALL: [PartyType; 3] = [PartyType::Sires, PartyType::Jockeys, PartyType::Trainers];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sires => "sires",
            Self::Jockeys => "jockeys",
            Self::Trainers => "trainers",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown party type '{0}' (expected sires, jockeys or trainers)")]
pub struct ParsePartyTypeError(pub String);

impl FromStr for PartyType {
    type Err = ParsePartyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sires" => Ok(Self::Sires),
            "jockeys" => Ok(Self::Jockeys),
            "trainers" => Ok(Self::Trainers),
            _ => Err(ParsePartyTypeError(s.to_string())),
        }
    }
}

/// Opaque identity of a ranked party.
///
/// Sires are identified by horse name; jockeys and trainers by their
/// first/last name pair. The ranking engine only compares keys for
/// equality and never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyKey {
    Named(String),
    Person { first: String, last: String },
}

impl PartyKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn person(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self::Person {
            first: first.into(),
            last: last.into(),
        }
    }
}

impl fmt::Display for PartyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Person { first, last } if first.is_empty() => f.write_str(last),
            Self::Person { first, last } => write!(f, "{first} {last}"),
        }
    }
}

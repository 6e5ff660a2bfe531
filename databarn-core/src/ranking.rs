//! Tie-aware top-N ranking — "top 3 distinct win counts, with every tied party".
//!
//! A plain "top 3 rows" leaderboard splits tied parties arbitrarily: a fourth
//! party tied with the third would silently disappear. Instead the ranker
//! groups the descending input into buckets of equal win count and keeps the
//! first [`TOP_TIERS`] buckets whole. The last bucket can therefore hold any
//! number of parties.
//!
//! Input must already be sorted descending by win count. The aggregator
//! establishes that order; the ranker only walks it once and never looks
//! past the end, so short input yields fewer buckets rather than a panic.

use serde::{Deserialize, Serialize};

use crate::domain::{PartyKey, WinFact};

/// Number of distinct win-count levels kept per slice.
pub const TOP_TIERS: usize = 3;

/// All parties sharing exactly one win count, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TieBucket {
    pub win_count: u32,
    pub members: Vec<PartyKey>,
}

impl TieBucket {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The leaderboard of one slice: up to [`TOP_TIERS`] buckets, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedSlice {
    buckets: Vec<TieBucket>,
}

impl RankedSlice {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn buckets(&self) -> &[TieBucket] {
        &self.buckets
    }

    /// Number of buckets (distinct win counts), never more than [`TOP_TIERS`].
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of ranked parties across all buckets.
    pub fn party_count(&self) -> usize {
        self.buckets.iter().map(TieBucket::len).sum()
    }

    /// Every ranked party, best bucket first.
    pub fn members(&self) -> impl Iterator<Item = &PartyKey> {
        self.buckets.iter().flat_map(|b| b.members.iter())
    }

    /// Bucket holding the given party, if it was ranked.
    pub fn bucket_of(&self, identity: &PartyKey) -> Option<&TieBucket> {
        self.buckets.iter().find(|b| b.members.contains(identity))
    }
}

/// Rank facts that are sorted descending by `win_count`.
///
/// - Empty input → empty result.
/// - Each run of equal counts becomes one bucket; member order is input order.
/// - Stops after [`TOP_TIERS`] buckets or at end of input, whichever is first.
pub fn rank_with_ties<I>(sorted_desc: I) -> RankedSlice
where
    I: IntoIterator<Item = WinFact>,
{
    let mut buckets: Vec<TieBucket> = Vec::with_capacity(TOP_TIERS);

    for fact in sorted_desc {
        match buckets.last_mut() {
            Some(current) if current.win_count == fact.win_count => {
                current.members.push(fact.identity);
            }
            _ => {
                if buckets.len() == TOP_TIERS {
                    break;
                }
                debug_assert!(
                    buckets.last().map_or(true, |b| b.win_count > fact.win_count),
                    "ranker input must be sorted descending by win count"
                );
                buckets.push(TieBucket {
                    win_count: fact.win_count,
                    members: vec![fact.identity],
                });
            }
        }
    }

    RankedSlice { buckets }
}

// ─── Tests ───────────────────────────────────────────────────────────

//! Per-party report — one ranked leaderboard per declared slice.
//!
//! A report always holds exactly one [`SliceRanking`] per catalog slice, in
//! catalog order, even when a slice matched no wins. Reports are plain values:
//! computing one twice against an unchanged source yields equal reports with
//! equal fingerprints.

use serde::{Deserialize, Serialize};

use databarn_core::{Dimension, PartitionCatalog, PartyType, RankedSlice, Slice};

/// The ranked leaderboard of one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRanking {
    pub slice: Slice,
    pub ranking: RankedSlice,
}

/// All slice leaderboards for one party type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    party: PartyType,
    slices: Vec<SliceRanking>,
}

impl Report {
    pub fn new(party: PartyType, slices: Vec<SliceRanking>) -> Self {
        Self { party, slices }
    }

    pub fn party(&self) -> PartyType {
        self.party
    }

    pub fn slices(&self) -> &[SliceRanking] {
        &self.slices
    }

    pub fn get(&self, slice: &Slice) -> Option<&RankedSlice> {
        self.slices
            .iter()
            .find(|s| &s.slice == slice)
            .map(|s| &s.ranking)
    }

    /// Slice rankings of one dimension, in catalog order.
    pub fn dimension(&self, dimension: Dimension) -> impl Iterator<Item = &SliceRanking> {
        self.slices
            .iter()
            .filter(move |s| s.slice.dimension == dimension)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// True if the report has exactly one entry per catalog slice, in order.
    pub fn covers(&self, catalog: &PartitionCatalog) -> bool {
        self.slices.len() == catalog.len()
            && self
                .slices
                .iter()
                .zip(catalog.list_slices())
                .all(|(ranked, declared)| &ranked.slice == declared)
    }

    /// BLAKE3 hex digest of the report's JSON form.
    ///
    /// Two reports with the same fingerprint rank the same parties in the
    /// same order with the same counts. Identities hash by shape, so a named
    /// party never collides with a person whose name prints the same.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

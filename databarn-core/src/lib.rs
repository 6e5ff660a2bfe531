//! databarn core — domain types, partition catalog, ranker, fact source contract.
//!
//! This crate contains the heart of the leaderboard engine:
//! - Domain types (parties, win facts, race-book records)
//! - Partition catalog of dimensions and slices
//! - Tie-aware top-3 ranker
//! - Fact source trait, party adapters, and an in-memory race book

pub mod catalog;
pub mod domain;
pub mod ranking;
pub mod source;

pub use catalog::{
    CatalogEntry, CatalogError, Dimension, DistanceClass, PartitionCatalog, Slice, SlicePredicate,
    SPRINT_MAX_FURLONGS,
};
pub use domain::{MalformedFact, PartyKey, PartyType, RawWinRow, WinFact};
pub use ranking::{rank_with_ties, RankedSlice, TieBucket, TOP_TIERS};
pub use source::{FactSource, RaceBook, RaceBookSnapshot, SourceError};

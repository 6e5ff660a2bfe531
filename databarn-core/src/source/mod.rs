//! Fact source contract and structured error types.
//!
//! The [`FactSource`] trait abstracts over wherever win counts come from
//! (a relational database, an in-memory race book, a test stub) so the
//! aggregator never depends on storage internals.

pub mod adapter;
pub mod race_book;

use thiserror::Error;

use crate::catalog::SlicePredicate;
use crate::domain::{PartyType, RawWinRow};

pub use adapter::{adapter_for, JockeyAdapter, PartyAdapter, SireAdapter, TrainerAdapter, Win};
pub use race_book::{RaceBook, RaceBookSnapshot};

/// Structured error types for fact source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("fact source unavailable: {0}")]
    Unavailable(String),

    #[error("inconsistent source data: {0}")]
    Inconsistent(String),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Supplies grouped win counts for one party type under one slice predicate.
///
/// Implementations own storage and query shape; callers treat the predicate
/// as opaque and the returned rows as unvalidated. Rows should carry unique
/// identities; the aggregator rejects result sets that don't.
pub trait FactSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Win counts per party for every win matching `predicate`.
    fn query(
        &self,
        party: PartyType,
        predicate: &SlicePredicate,
    ) -> Result<Vec<RawWinRow>, SourceError>;

    /// Total number of runnings recorded, won or not.
    fn count_runnings(&self) -> Result<u64, SourceError>;
}

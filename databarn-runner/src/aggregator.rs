//! Aggregator — fetches, validates and orders win facts, then ranks them.
//!
//! For one party type and one slice, the aggregator asks the fact source for
//! grouped win counts and turns the raw rows into [`WinFact`]s:
//! 1. Any source failure → `SourceUnavailable` (no retries here)
//! 2. Negative or oversized counts, repeated identities → `Malformed`
//! 3. Stable sort descending by win count, so the ranker's precondition
//!    holds regardless of the order the source returned
//!
//! [`aggregate_all`] runs every catalog slice and is all-or-nothing: the
//! first failing slice aborts the party's report.

use std::collections::HashSet;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use databarn_core::{
    rank_with_ties, CatalogEntry, FactSource, MalformedFact, PartitionCatalog, PartyType,
    RawWinRow, Slice, SlicePredicate, SourceError, WinFact,
};

use crate::report::{Report, SliceRanking};

/// Errors from the aggregation layer.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{party} {slice}: source unavailable: {source}")]
    SourceUnavailable {
        party: PartyType,
        slice: Slice,
        #[source]
        source: SourceError,
    },

    #[error("{party} {slice}: malformed fact: {fact}")]
    Malformed {
        party: PartyType,
        slice: Slice,
        fact: MalformedFact,
    },

    #[error("slice '{0}' is not declared in the catalog")]
    UnknownSlice(Slice),
}

/// Options controlling how slices are fanned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Query slices concurrently on the rayon pool.
    pub parallel: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Validated win facts for one declared slice, sorted descending.
pub fn aggregate<S>(
    source: &S,
    catalog: &PartitionCatalog,
    party: PartyType,
    slice: &Slice,
) -> Result<Vec<WinFact>, AggregateError>
where
    S: FactSource + ?Sized,
{
    let predicate = catalog
        .predicate_for(slice)
        .ok_or_else(|| AggregateError::UnknownSlice(slice.clone()))?;
    collect_facts(source, party, slice, predicate)
}

/// Rank every catalog slice for one party type.
///
/// The report lists slices in catalog order whether or not they were
/// queried in parallel.
pub fn aggregate_all<S>(
    source: &S,
    catalog: &PartitionCatalog,
    party: PartyType,
    opts: AggregateOptions,
) -> Result<Report, AggregateError>
where
    S: FactSource + ?Sized,
{
    let rank_entry = |entry: &CatalogEntry| -> Result<SliceRanking, AggregateError> {
        let facts = collect_facts(source, party, &entry.slice, &entry.predicate)?;
        let fact_count = facts.len();
        let ranking = rank_with_ties(facts);
        debug!(
            %party,
            slice = %entry.slice,
            facts = fact_count,
            buckets = ranking.len(),
            ranked = ranking.party_count(),
            "ranked slice"
        );
        Ok(SliceRanking {
            slice: entry.slice.clone(),
            ranking,
        })
    };

    let rankings = if opts.parallel {
        catalog
            .entries()
            .par_iter()
            .map(rank_entry)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        catalog
            .entries()
            .iter()
            .map(rank_entry)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Report::new(party, rankings))
}

fn collect_facts<S>(
    source: &S,
    party: PartyType,
    slice: &Slice,
    predicate: &SlicePredicate,
) -> Result<Vec<WinFact>, AggregateError>
where
    S: FactSource + ?Sized,
{
    let rows = source
        .query(party, predicate)
        .map_err(|source| AggregateError::SourceUnavailable {
            party,
            slice: slice.clone(),
            source,
        })?;

    validate_rows(rows).map_err(|fact| {
        warn!(%party, %slice, %fact, "rejecting malformed result set");
        AggregateError::Malformed {
            party,
            slice: slice.clone(),
            fact,
        }
    })
}

/// Validate raw rows and sort them descending by win count.
///
/// The sort is stable: rows with equal counts keep the source's order.
pub fn validate_rows(rows: Vec<RawWinRow>) -> Result<Vec<WinFact>, MalformedFact> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut facts = Vec::with_capacity(rows.len());

    for row in rows {
        if !seen.insert(row.identity.clone()) {
            return Err(MalformedFact::DuplicateIdentity {
                identity: row.identity,
            });
        }
        facts.push(WinFact::try_from(row)?);
    }

    facts.sort_by(|a, b| b.win_count.cmp(&a.win_count));
    Ok(facts)
}

// ─── Tests ───────────────────────────────────────────────────────────

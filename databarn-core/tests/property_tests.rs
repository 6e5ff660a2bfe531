//! Property tests for ranker invariants.
//!
//! Uses proptest to verify:
//! 1. Ordering — bucket counts strictly descend; tie order follows input order
//! 2. Bucket cap — never more than three buckets
//! 3. Coverage — every fact in the top three distinct counts appears exactly
//!    once, nothing lower appears
//! 4. Determinism — ranking the same input twice gives the same result

use proptest::prelude::*;
use std::collections::BTreeSet;

use databarn_core::{rank_with_ties, PartyKey, RankedSlice, WinFact, TOP_TIERS};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Descending fact lists with unique identities and plenty of ties.
fn arb_sorted_facts() -> impl Strategy<Value = Vec<WinFact>> {
    prop::collection::vec(0u32..12, 0..60).prop_map(|mut counts| {
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts
            .into_iter()
            .enumerate()
            .map(|(i, wins)| WinFact::new(PartyKey::named(format!("P{i}")), wins))
            .collect()
    })
}

fn top_distinct_counts(facts: &[WinFact]) -> BTreeSet<u32> {
    let distinct: BTreeSet<u32> = facts.iter().map(|f| f.win_count).collect();
    distinct.into_iter().rev().take(TOP_TIERS).collect()
}

fn rank(facts: &[WinFact]) -> RankedSlice {
    rank_with_ties(facts.to_vec())
}

proptest! {
    #[test]
    fn buckets_strictly_descend(facts in arb_sorted_facts()) {
        let ranked = rank(&facts);
        for pair in ranked.buckets().windows(2) {
            prop_assert!(pair[0].win_count > pair[1].win_count);
        }
    }

    #[test]
    fn never_more_than_three_buckets(facts in arb_sorted_facts()) {
        prop_assert!(rank(&facts).len() <= TOP_TIERS);
    }

    #[test]
    fn no_bucket_is_empty(facts in arb_sorted_facts()) {
        for bucket in rank(&facts).buckets() {
            prop_assert!(!bucket.is_empty());
        }
    }

    #[test]
    fn bucket_count_matches_distinct_counts(facts in arb_sorted_facts()) {
        let expected = top_distinct_counts(&facts).len();
        prop_assert_eq!(rank(&facts).len(), expected);
    }

    #[test]
    fn top_tier_facts_appear_exactly_once(facts in arb_sorted_facts()) {
        let ranked = rank(&facts);
        let top = top_distinct_counts(&facts);
        let ranked_members: Vec<&PartyKey> = ranked.members().collect();

        for fact in &facts {
            let occurrences = ranked_members.iter().filter(|m| ***m == fact.identity).count();
            if top.contains(&fact.win_count) {
                prop_assert_eq!(occurrences, 1);
                let bucket = ranked.bucket_of(&fact.identity).unwrap();
                prop_assert_eq!(bucket.win_count, fact.win_count);
            } else {
                prop_assert_eq!(occurrences, 0);
            }
        }
    }

    #[test]
    fn tie_order_matches_input_order(facts in arb_sorted_facts()) {
        let ranked = rank(&facts);
        for bucket in ranked.buckets() {
            let expected: Vec<&PartyKey> = facts
                .iter()
                .filter(|f| f.win_count == bucket.win_count)
                .map(|f| &f.identity)
                .collect();
            let actual: Vec<&PartyKey> = bucket.members.iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn ranking_is_deterministic(facts in arb_sorted_facts()) {
        prop_assert_eq!(rank(&facts), rank(&facts));
    }
}

// ── Scenarios ────────────────────────────────────────────────────────

fn named(rows: &[(&str, u32)]) -> Vec<WinFact> {
    rows.iter()
        .map(|(n, w)| WinFact::new(PartyKey::named(*n), *w))
        .collect()
}

fn as_pairs(ranked: &RankedSlice) -> Vec<(u32, Vec<String>)> {
    ranked
        .buckets()
        .iter()
        .map(|b| (b.win_count, b.members.iter().map(ToString::to_string).collect()))
        .collect()
}

#[test]
fn scenario_ties_in_first_and_third_tier() {
    let ranked = rank_with_ties(named(&[("A", 10), ("B", 10), ("C", 9), ("D", 8), ("E", 8)]));
    assert_eq!(
        as_pairs(&ranked),
        vec![
            (10, vec!["A".to_string(), "B".to_string()]),
            (9, vec!["C".to_string()]),
            (8, vec!["D".to_string(), "E".to_string()]),
        ]
    );
}

#[test]
fn scenario_empty() {
    assert!(rank_with_ties(Vec::new()).is_empty());
}

#[test]
fn scenario_single_party() {
    let ranked = rank_with_ties(named(&[("A", 5)]));
    assert_eq!(as_pairs(&ranked), vec![(5, vec!["A".to_string()])]);
}

#[test]
fn scenario_five_distinct_counts() {
    let ranked = rank_with_ties(named(&[("A", 10), ("B", 9), ("C", 8), ("D", 7), ("E", 6)]));
    let counts: Vec<u32> = ranked.buckets().iter().map(|b| b.win_count).collect();
    assert_eq!(counts, vec![10, 9, 8]);
    assert_eq!(ranked.party_count(), 3);
}

#[test]
fn scenario_all_tied() {
    let ranked = rank_with_ties(named(&[("A", 3), ("B", 3), ("C", 3)]));
    assert_eq!(
        as_pairs(&ranked),
        vec![(3, vec!["A".to_string(), "B".to_string(), "C".to_string()])]
    );
}

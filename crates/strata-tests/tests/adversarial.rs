//! Adversarial property-based tests for the reorg guard.
//!
//! These tests attempt to break the guard's invariants under randomized
//! tables, chains, and candidate blocks. Each property runs 256 cases with
//! proptest shrinking to produce minimal failing examples.
//!
//! Attack vectors tested:
//! - Forged block at a pinned height
//! - Arbitrary block at an unpinned height
//! - Index stuffed with hashes that are not checkpoints
//! - Reorg targeting a height at or below the sync horizon

use std::collections::BTreeMap;

use proptest::prelude::*;
use strata_consensus::checkpoint::{Checkpoint, CheckpointTable};
use strata_consensus::sync::{auto_select_sync_checkpoint, check_sync};
use strata_consensus::ReorgGuard;
use strata_core::block_index::BlockIndex;
use strata_core::traits::ChainView;
use strata_core::types::Hash256;
use strata_tests::helpers::{block_hash, linear_chain};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_hash() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256)
}

/// A sorted checkpoint list with unique heights.
fn arb_checkpoints() -> impl Strategy<Value = Vec<Checkpoint>> {
    prop::collection::btree_map(0u64..1_000_000, arb_hash(), 0..32).prop_map(|map: BTreeMap<u64, Hash256>| {
        map.into_iter()
            .map(|(height, hash)| Checkpoint::new(height, hash))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Test 1: unpinned heights are unconstrained
//
// Attack vector: none, this is the permissive side. The guard must never
// reject a block only because of its hash at a height that has no pin.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unpinned_height_accepts_any_hash(
        entries in arb_checkpoints(),
        height in any::<u64>(),
        hash in arb_hash(),
    ) {
        let table = CheckpointTable::new(&entries);
        prop_assume!(table.get(height).is_none());
        prop_assert!(table.check_hardened(height, &hash));
    }
}

// ---------------------------------------------------------------------------
// Test 2: pinned heights accept exactly one hash
//
// Attack vector: an adversary publishes a block at a checkpoint height with
// a different hash, hoping to fork the chain below the pin.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn pinned_height_accepts_only_pinned_hash(
        entries in arb_checkpoints(),
        pick in any::<prop::sample::Index>(),
        forged in arb_hash(),
    ) {
        prop_assume!(!entries.is_empty());
        let table = CheckpointTable::new(&entries);
        let cp = entries[pick.index(entries.len())];

        prop_assert!(table.check_hardened(cp.height, &cp.hash));
        if forged != cp.hash {
            prop_assert!(!table.check_hardened(cp.height, &forged));
        }
    }
}

// ---------------------------------------------------------------------------
// Test 3: progress estimate is the highest pinned height
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn estimate_is_max_height(entries in arb_checkpoints()) {
        let table = CheckpointTable::new(&entries);
        let expected = entries.iter().map(|cp| cp.height).max().unwrap_or(0);
        prop_assert_eq!(table.total_blocks_estimate(), expected);
    }
}

// ---------------------------------------------------------------------------
// Test 4: last local checkpoint
//
// Attack vector: an index stuffed with non-checkpoint hashes must not make
// the resolver report one of them as a checkpoint.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn last_checkpoint_is_highest_indexed_entry(
        entries in arb_checkpoints(),
        present in prop::collection::vec(any::<bool>(), 32),
        noise in prop::collection::vec(arb_hash(), 0..16),
    ) {
        let table = CheckpointTable::new(&entries);

        let mut index = BlockIndex::new();
        let mut parent: Option<Hash256> = None;
        let picked = entries.iter().zip(&present).filter(|(_, keep)| **keep).map(|(cp, _)| cp.hash);
        for hash in picked.chain(noise.iter().copied()) {
            if index.insert(hash, parent.as_ref()).is_ok() {
                parent = Some(hash);
            }
        }

        // Random noise may coincide with a table hash, so the expectation
        // is computed from what actually ended up in the index.
        let expected = entries.iter().rev().find(|cp| index.contains(&cp.hash));
        let found = table.last_checkpoint(&index);

        prop_assert_eq!(found.map(|node| node.hash), expected.map(|cp| cp.hash));
        if let Some(node) = found {
            prop_assert!(entries.iter().any(|cp| cp.hash == node.hash));
        }
    }
}

// ---------------------------------------------------------------------------
// Test 5: horizon on a linear chain is max(0, H - S)
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn linear_horizon_height(tip_height in 0u64..1_500, span in 0u64..2_000) {
        let index = linear_chain(tip_height);
        let horizon = auto_select_sync_checkpoint(&index, span).unwrap();
        prop_assert_eq!(horizon.height, tip_height.saturating_sub(span));
        prop_assert_eq!(horizon.hash, block_hash(horizon.height, 0));
    }
}

// ---------------------------------------------------------------------------
// Test 6: compliance agrees with the horizon
//
// Attack vector: a reorg targeting exactly the horizon height or below must
// be refused; anything strictly above is allowed.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn check_sync_iff_above_horizon(
        tip_height in 0u64..1_500,
        span in 0u64..2_000,
        candidate in 0u64..3_000,
    ) {
        let index = linear_chain(tip_height);
        let horizon = auto_select_sync_checkpoint(&index, span).unwrap().height;
        let allowed = check_sync(&index, span, candidate).unwrap();
        prop_assert_eq!(allowed, candidate > horizon);

        let guard = ReorgGuard::new(CheckpointTable::EMPTY, span);
        prop_assert_eq!(guard.enforce_sync(&index, candidate).is_ok(), allowed);
    }
}

// ---------------------------------------------------------------------------
// Test 7: the horizon is always an ancestor of the tip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn horizon_is_tip_ancestor(tip_height in 0u64..1_200, span in 0u64..1_500) {
        let index = linear_chain(tip_height);
        let horizon = auto_select_sync_checkpoint(&index, span).unwrap();

        let mut node = index.tip().unwrap();
        while node.id != horizon.id {
            node = index.parent(node).expect("horizon must be reachable from tip");
        }
        prop_assert!(horizon.height <= index.tip().unwrap().height);
    }
}

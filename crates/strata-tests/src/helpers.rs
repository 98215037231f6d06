//! Shared chain builders for integration tests.

use sha2::{Digest, Sha256};
use strata_core::block_index::BlockIndex;
use strata_core::traits::ChainView;
use strata_core::types::Hash256;

/// Deterministic block hash for `height` on branch `branch`.
///
/// SHA-256 over `height || branch`, so distinct branches never collide with
/// each other or with table hashes written as repeated bytes.
pub fn block_hash(height: u64, branch: u8) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(height.to_le_bytes());
    hasher.update([branch]);
    Hash256(hasher.finalize().into())
}

/// A linear chain `0..=tip_height` on branch 0 with the tip set.
pub fn linear_chain(tip_height: u64) -> BlockIndex {
    let mut index = BlockIndex::new();
    extend_linear(&mut index, tip_height);
    index
}

/// Extend the current tip of `index` on branch 0 until it reaches
/// `tip_height`. Starts with genesis on an empty index.
pub fn extend_linear(index: &mut BlockIndex, tip_height: u64) {
    let start = index.tip().map_or(0, |tip| tip.height + 1);
    for height in start..=tip_height {
        index
            .extend_tip(block_hash(height, 0))
            .expect("linear extension never collides");
    }
}

/// Attach a side branch of `len` blocks on top of `fork`, without moving the
/// tip. Returns the hash of the branch's last block.
pub fn grow_branch(index: &mut BlockIndex, fork: &Hash256, len: u64, branch: u8) -> Hash256 {
    let fork_height = index.get(fork).expect("fork point must be indexed").height;
    let mut parent = *fork;
    for height in fork_height + 1..=fork_height + len {
        let hash = block_hash(height, branch);
        index
            .insert(hash, Some(&parent))
            .expect("branch blocks are unique");
        parent = hash;
    }
    parent
}

//! Sync-horizon selection and enforcement.
//!
//! The sync horizon is the highest ancestor of the current tip that lies at
//! least `span` blocks below it. Blocks at or below the horizon are treated
//! as settled: a block or reorganization targeting such a height must be
//! rejected. The horizon moves forward as the tip advances, so it is
//! recomputed from the tip on every call and never cached.
//!
//! Both functions borrow the chain view for the whole walk. When the view is
//! backed by a [`SharedBlockIndex`](strata_core::block_index::SharedBlockIndex)
//! it must come from a single read guard, otherwise the tip could move while
//! the parent links are being followed.

use strata_core::block_index::BlockIndexNode;
use strata_core::error::CheckpointError;
use strata_core::traits::ChainView;

/// Select the sync horizon for the current tip of `chain`.
///
/// Starting at the tip, steps to the parent while one exists and the current
/// node is still within `span` blocks of the tip. The result is the ancestor
/// at height `tip.height - span` on a linear chain, or genesis when the chain
/// is shorter than `span`. A tip without a parent is returned unchanged.
///
/// # Errors
///
/// Returns [`CheckpointError::EmptyChain`] if `chain` has no tip.
pub fn auto_select_sync_checkpoint<'c, C>(
    chain: &'c C,
    span: u64,
) -> Result<&'c BlockIndexNode, CheckpointError>
where
    C: ChainView + ?Sized,
{
    let tip = chain.tip().ok_or(CheckpointError::EmptyChain)?;
    let mut node = tip;
    while node.height.saturating_add(span) > tip.height {
        match chain.parent(node) {
            Some(parent) => node = parent,
            None => break,
        }
    }
    Ok(node)
}

/// Whether a block at `height` may still be added or replaced.
///
/// Returns `true` iff `height` is strictly above the horizon selected by
/// [`auto_select_sync_checkpoint`] for the same tip.
///
/// # Errors
///
/// Returns [`CheckpointError::EmptyChain`] if `chain` has no tip.
pub fn check_sync<C>(chain: &C, span: u64, height: u64) -> Result<bool, CheckpointError>
where
    C: ChainView + ?Sized,
{
    let horizon = auto_select_sync_checkpoint(chain, span)?;
    Ok(height > horizon.height)
}

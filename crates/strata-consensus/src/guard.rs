//! Reorganization guard: checkpoint pins and the sync horizon in one place.
//!
//! The block-acceptance layer builds one [`ReorgGuard`] for the active
//! network and calls into it at its decision points. The guard holds no
//! chain state of its own. Every chain-dependent query takes the chain view
//! as an argument, so the tip it sees is whatever is current at call time.
//!
//! # Usage
//!
//! - Before connecting a block at a known height, call
//!   [`ReorgGuard::enforce_block`].
//! - Before switching to a competing branch whose fork point is at height
//!   `f`, call [`ReorgGuard::enforce_reorg`] with `f`.
//!
//! The boolean queries ([`check_hardened`](ReorgGuard::check_hardened),
//! [`check_sync`](ReorgGuard::check_sync)) are available for callers that
//! only need the decision.

use strata_core::block_index::BlockIndexNode;
use strata_core::constants::{CHECKPOINT_SPAN, NetworkType};
use strata_core::error::CheckpointError;
use strata_core::traits::ChainView;
use strata_core::types::Hash256;
use tracing::{debug, warn};

use crate::checkpoint::CheckpointTable;
use crate::sync;

/// Checkpoint table plus sync span for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorgGuard<'a> {
    table: CheckpointTable<'a>,
    span: u64,
}

impl ReorgGuard<'static> {
    /// The guard for `network`: its compiled-in table and [`CHECKPOINT_SPAN`].
    pub fn for_network(network: NetworkType) -> Self {
        Self::new(*CheckpointTable::for_network(network), CHECKPOINT_SPAN)
    }
}

impl<'a> ReorgGuard<'a> {
    /// Build a guard from an explicit table and span.
    pub const fn new(table: CheckpointTable<'a>, span: u64) -> Self {
        Self { table, span }
    }

    /// The checkpoint table this guard enforces.
    pub fn table(&self) -> &CheckpointTable<'a> {
        &self.table
    }

    /// Blocks between the tip and the sync horizon.
    pub fn span(&self) -> u64 {
        self.span
    }

    /// See [`CheckpointTable::check_hardened`].
    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        self.table.check_hardened(height, hash)
    }

    /// See [`CheckpointTable::total_blocks_estimate`].
    pub fn total_blocks_estimate(&self) -> u64 {
        self.table.total_blocks_estimate()
    }

    /// See [`CheckpointTable::last_checkpoint`].
    pub fn last_checkpoint<'c, C>(&self, chain: &'c C) -> Option<&'c BlockIndexNode>
    where
        C: ChainView + ?Sized,
    {
        let node = self.table.last_checkpoint(chain);
        if let Some(node) = node {
            debug!(height = node.height, hash = %node.hash, "last local checkpoint");
        }
        node
    }

    /// The current sync horizon. See [`sync::auto_select_sync_checkpoint`].
    pub fn sync_checkpoint<'c, C>(&self, chain: &'c C) -> Result<&'c BlockIndexNode, CheckpointError>
    where
        C: ChainView + ?Sized,
    {
        let horizon = sync::auto_select_sync_checkpoint(chain, self.span)?;
        debug!(height = horizon.height, hash = %horizon.hash, span = self.span, "sync horizon selected");
        Ok(horizon)
    }

    /// Whether `height` is above the current sync horizon.
    pub fn check_sync<C>(&self, chain: &C, height: u64) -> Result<bool, CheckpointError>
    where
        C: ChainView + ?Sized,
    {
        Ok(height > self.sync_checkpoint(chain)?.height)
    }

    /// Reject `hash` at `height` if it contradicts a checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::Mismatch`] when `height` is pinned to a
    /// different hash.
    pub fn enforce_hardened(&self, height: u64, hash: &Hash256) -> Result<(), CheckpointError> {
        match self.table.get(height) {
            Some(expected) if expected != hash => {
                warn!(height, expected = %expected, got = %hash, "checkpoint mismatch");
                Err(CheckpointError::Mismatch {
                    height,
                    expected: expected.to_string(),
                    got: hash.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Reject any change at `height` if it is at or below the sync horizon.
    ///
    /// # Errors
    ///
    /// - [`CheckpointError::BelowSyncHorizon`] if `height` is settled
    /// - [`CheckpointError::EmptyChain`] if `chain` has no tip
    pub fn enforce_sync<C>(&self, chain: &C, height: u64) -> Result<(), CheckpointError>
    where
        C: ChainView + ?Sized,
    {
        let horizon = self.sync_checkpoint(chain)?;
        if height <= horizon.height {
            warn!(height, horizon = horizon.height, "height at or below sync horizon");
            return Err(CheckpointError::BelowSyncHorizon {
                height,
                horizon: horizon.height,
            });
        }
        Ok(())
    }

    /// Full acceptance check for a block `hash` at `height`: checkpoint pin
    /// first, then the sync horizon.
    pub fn enforce_block<C>(&self, chain: &C, height: u64, hash: &Hash256) -> Result<(), CheckpointError>
    where
        C: ChainView + ?Sized,
    {
        self.enforce_hardened(height, hash)?;
        self.enforce_sync(chain, height)
    }

    /// Check a reorganization whose common ancestor with the current chain
    /// is at `fork_height`.
    ///
    /// The reorg disconnects every block above the fork point, so the lowest
    /// rewritten height is `fork_height + 1` and it must be above the horizon.
    pub fn enforce_reorg<C>(&self, chain: &C, fork_height: u64) -> Result<(), CheckpointError>
    where
        C: ChainView + ?Sized,
    {
        self.enforce_sync(chain, fork_height.saturating_add(1))
    }
}

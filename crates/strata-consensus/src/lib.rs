//! # strata-consensus — Checkpoint enforcement and the sync horizon.
//!
//! Guards the local chain against deep reorganizations in two ways:
//!
//! - [`checkpoint`]: compiled-in `(height, hash)` pins. A block at a pinned
//!   height must carry the pinned hash.
//! - [`sync`]: a sliding horizon [`CHECKPOINT_SPAN`](strata_core::constants::CHECKPOINT_SPAN)
//!   blocks behind the tip. Heights at or below it may not be rewritten.
//!
//! [`ReorgGuard`] bundles both behind one context object for the
//! block-acceptance layer.

pub mod checkpoint;
pub mod guard;
pub mod sync;

pub use checkpoint::{Checkpoint, CheckpointTable, MAINNET_CHECKPOINTS, TESTNET_CHECKPOINTS};
pub use guard::ReorgGuard;
pub use sync::{auto_select_sync_checkpoint, check_sync};

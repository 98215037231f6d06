//! Error types for the Strata node.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: {0} bytes, expected 32")] InvalidLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockIndexError {
    #[error("duplicate block: {0}")] DuplicateBlock(String),
    #[error("unknown parent {parent} for block {hash}")] UnknownParent { hash: String, parent: String },
    #[error("genesis already indexed: {0}")] GenesisExists(String),
    #[error("block not found: {0}")] BlockNotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint mismatch at height {height}: expected {expected}, got {got}")] Mismatch { height: u64, expected: String, got: String },
    #[error("height {height} is at or below sync horizon {horizon}")] BelowSyncHorizon { height: u64, horizon: u64 },
    #[error("empty chain: no chain tip")] EmptyChain,
}

#[derive(Error, Debug)]
pub enum StrataError {
    #[error(transparent)] HashParse(#[from] HashParseError),
    #[error(transparent)] BlockIndex(#[from] BlockIndexError),
    #[error(transparent)] Checkpoint(#[from] CheckpointError),
}

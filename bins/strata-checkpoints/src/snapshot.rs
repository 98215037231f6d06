//! JSON block-index snapshots.
//!
//! A snapshot lists blocks parents-first and names the tip:
//!
//! ```json
//! {
//!   "tip": "00..03",
//!   "blocks": [
//!     { "hash": "00..01", "parent": null },
//!     { "hash": "00..02", "parent": "00..01" },
//!     { "hash": "00..03", "parent": "00..02" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use strata_core::block_index::BlockIndex;
use strata_core::error::StrataError;
use strata_core::types::Hash256;

#[derive(Debug, Deserialize)]
pub struct IndexSnapshot {
    /// Hash of the chain tip. Absent when the snapshot has no tip yet.
    #[serde(default)]
    pub tip: Option<String>,
    pub blocks: Vec<SnapshotBlock>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotBlock {
    pub hash: String,
    /// `null` for genesis.
    pub parent: Option<String>,
}

impl IndexSnapshot {
    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))
    }

    /// Build a block index from the snapshot, in file order.
    pub fn into_index(self) -> Result<BlockIndex, StrataError> {
        let mut index = BlockIndex::new();
        for block in &self.blocks {
            let hash: Hash256 = block.hash.parse()?;
            let parent = block
                .parent
                .as_deref()
                .map(str::parse::<Hash256>)
                .transpose()?;
            index.insert(hash, parent.as_ref())?;
        }
        if let Some(tip) = &self.tip {
            let tip: Hash256 = tip.parse()?;
            index.set_tip(&tip)?;
        }
        Ok(index)
    }
}

//! Block index arena and shared chain-state handle.
//!
//! [`BlockIndex`] stores one [`BlockIndexNode`] per known block in a flat
//! arena. Nodes are addressed by stable [`NodeId`] handles and parent links
//! are stored as handles, so walking toward genesis never touches raw
//! references into a structure that may be growing. A hash → handle map
//! serves lookups by block hash.
//!
//! The index records topology only. Choosing the best tip is the job of the
//! fork-choice layer, which reports its decision through
//! [`BlockIndex::set_tip`].
//!
//! [`SharedBlockIndex`] wraps the index in a `RwLock` for use by a running
//! node. Readers that walk the chain (the checkpoint guard in particular)
//! must hold the read guard for the whole walk.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BlockIndexError;
use crate::traits::ChainView;
use crate::types::Hash256;

/// Stable handle of a node inside a [`BlockIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena slot.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena slot.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One block's position in the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexNode {
    /// Handle of this node in its arena.
    pub id: NodeId,
    /// Block header hash.
    pub hash: Hash256,
    /// Distance from genesis (genesis is 0).
    pub height: u64,
    /// Immediate predecessor, `None` for genesis.
    pub parent: Option<NodeId>,
}

/// Arena of indexed blocks plus the current chain tip.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex {
    nodes: Vec<BlockIndexNode>,
    by_hash: HashMap<Hash256, NodeId>,
    genesis: Option<NodeId>,
    tip: Option<NodeId>,
}

impl BlockIndex {
    /// Create an empty index with no tip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a block under `parent`, or as genesis when `parent` is `None`.
    ///
    /// The height is derived from the parent. The tip is not changed.
    ///
    /// # Errors
    ///
    /// - [`BlockIndexError::DuplicateBlock`] if `hash` is already indexed
    /// - [`BlockIndexError::UnknownParent`] if `parent` is not indexed
    /// - [`BlockIndexError::GenesisExists`] if `parent` is `None` and a
    ///   genesis block is already indexed
    pub fn insert(
        &mut self,
        hash: Hash256,
        parent: Option<&Hash256>,
    ) -> Result<NodeId, BlockIndexError> {
        if self.by_hash.contains_key(&hash) {
            return Err(BlockIndexError::DuplicateBlock(hash.to_string()));
        }

        let (parent_id, height) = match parent {
            Some(parent_hash) => {
                let parent_node =
                    self.get(parent_hash)
                        .ok_or_else(|| BlockIndexError::UnknownParent {
                            hash: hash.to_string(),
                            parent: parent_hash.to_string(),
                        })?;
                (Some(parent_node.id), parent_node.height + 1)
            }
            None => {
                if let Some(existing) = self.genesis {
                    return Err(BlockIndexError::GenesisExists(
                        self.nodes[existing.index()].hash.to_string(),
                    ));
                }
                (None, 0)
            }
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(BlockIndexNode {
            id,
            hash,
            height,
            parent: parent_id,
        });
        self.by_hash.insert(hash, id);
        if parent_id.is_none() {
            self.genesis = Some(id);
        }
        Ok(id)
    }

    /// Index a block on top of the current tip and make it the new tip.
    ///
    /// On an empty index the block becomes genesis.
    pub fn extend_tip(&mut self, hash: Hash256) -> Result<NodeId, BlockIndexError> {
        let parent = self.tip().map(|node| node.hash);
        let id = self.insert(hash, parent.as_ref())?;
        self.tip = Some(id);
        Ok(id)
    }

    /// Make the indexed block `hash` the current chain tip.
    ///
    /// # Errors
    ///
    /// Returns [`BlockIndexError::BlockNotFound`] if `hash` is not indexed.
    pub fn set_tip(&mut self, hash: &Hash256) -> Result<(), BlockIndexError> {
        let id = *self
            .by_hash
            .get(hash)
            .ok_or_else(|| BlockIndexError::BlockNotFound(hash.to_string()))?;
        self.tip = Some(id);
        Ok(())
    }

    /// Look up a node by block hash.
    pub fn get(&self, hash: &Hash256) -> Option<&BlockIndexNode> {
        self.by_hash.get(hash).map(|id| &self.nodes[id.index()])
    }

    /// The genesis node, if indexed.
    pub fn genesis(&self) -> Option<&BlockIndexNode> {
        self.genesis.map(|id| &self.nodes[id.index()])
    }

    /// Number of indexed blocks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no block is indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All indexed nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockIndexNode> {
        self.nodes.iter()
    }
}

impl ChainView for BlockIndex {
    fn tip(&self) -> Option<&BlockIndexNode> {
        self.tip.map(|id| &self.nodes[id.index()])
    }

    fn node(&self, id: NodeId) -> Option<&BlockIndexNode> {
        self.nodes.get(id.index())
    }

    fn find(&self, hash: &Hash256) -> Option<&BlockIndexNode> {
        self.get(hash)
    }
}

/// A [`BlockIndex`] shared between the block-acceptance pipeline and readers.
///
/// Cloning shares the same underlying index.
#[derive(Clone, Debug, Default)]
pub struct SharedBlockIndex {
    inner: Arc<RwLock<BlockIndex>>,
}

impl SharedBlockIndex {
    /// Wrap an existing index.
    pub fn new(index: BlockIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Acquire the read lock. The returned guard dereferences to a
    /// [`ChainView`] that stays consistent until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, BlockIndex> {
        self.inner.read()
    }

    /// Acquire the write lock for inserting blocks or moving the tip.
    pub fn write(&self) -> RwLockWriteGuard<'_, BlockIndex> {
        self.inner.write()
    }
}

//! Trait interfaces for the Strata node.
//!
//! - [`ChainView`] — read-only view of the block index and chain tip
//!   ([`BlockIndex`](crate::block_index::BlockIndex) implements)

use crate::block_index::{BlockIndexNode, NodeId};
use crate::types::Hash256;

/// Read-only view of the locally indexed blocks and the current chain tip.
///
/// Consumers such as the checkpoint guard borrow a view for the duration of
/// one call. Holding the borrow is what keeps the tip and the parent links
/// consistent while the call walks them, so a view backed by shared state
/// must be obtained under that state's read lock.
pub trait ChainView {
    /// The current best block, or `None` before genesis is indexed.
    fn tip(&self) -> Option<&BlockIndexNode>;

    /// Look up a node by its arena handle.
    fn node(&self, id: NodeId) -> Option<&BlockIndexNode>;

    /// Look up a node by block hash.
    fn find(&self, hash: &Hash256) -> Option<&BlockIndexNode>;

    /// Whether a block with this hash is indexed.
    ///
    /// Default implementation delegates to [`find`](Self::find).
    fn contains(&self, hash: &Hash256) -> bool {
        self.find(hash).is_some()
    }

    /// The immediate predecessor of `node`, or `None` at genesis.
    ///
    /// Default implementation resolves `node.parent` through
    /// [`node`](Self::node).
    fn parent(&self, node: &BlockIndexNode) -> Option<&BlockIndexNode> {
        node.parent.and_then(|id| self.node(id))
    }
}

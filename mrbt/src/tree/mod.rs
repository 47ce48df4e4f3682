// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Merkle red-black trees

mod audit;
mod insert;
mod rebalance;
mod remerkle;
mod verify;

use std::{cmp::Ordering, marker::PhantomData};

pub use audit::RedBlackAudit;
use mrbt_costs::{CostContext, CostsExt, OperationCost};
pub use verify::Verification;

use crate::{
    color::{Color, ColorTable},
    config::TreeConfig,
    hash::{CryptoHash, NodeHasher, Sha256Hasher},
    Error, Result,
};

/// Stable handle of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Holds the caller-supplied digest of one message.
    Leaf,
    /// Synthetic node created after each leaf; its digest is the hash of its
    /// children once it has two of them.
    Aggregate,
}

/// A single node. Children are owned through their arena handles; `parent`
/// is a plain back-reference.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) key: u64,
    pub(crate) kind: NodeKind,
    pub(crate) digest: CryptoHash,
    pub(crate) slot: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn children(&self) -> Option<(NodeId, NodeId)> {
        self.left.zip(self.right)
    }
}

/// An append-only binary search tree whose nodes double as Merkle
/// aggregation points.
///
/// Every [`insert`](MerkleRbTree::insert) adds a leaf holding the caller's
/// digest and a synthetic aggregate node keyed halfway to the next leaf.
/// Nodes are always attached along the rightmost spine and the tree is
/// rebalanced with left rotations and recoloring, which keeps it balanced for
/// a strictly increasing key stream. Aggregate digests are
/// `H(right ++ left)` of their children and are recomputed over the whole
/// tree after each structural change, at a cost proportional to the tree
/// size per insertion.
///
/// All nodes live in one arena owned by the tree and are released together
/// with it. Nothing is ever removed.
#[derive(Debug, Clone)]
pub struct MerkleRbTree<H = Sha256Hasher> {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    colors: ColorTable,
    config: TreeConfig,
    last_leaf_key: Option<u64>,
    leaf_count: usize,
    _hasher: PhantomData<H>,
}

impl Default for MerkleRbTree<Sha256Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl MerkleRbTree<Sha256Hasher> {
    /// Empty SHA-256 tree with the default configuration.
    pub fn new() -> Self {
        Self::empty(TreeConfig::default())
    }
}

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Empty tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            colors: ColorTable::new(),
            config,
            last_leaf_key: None,
            leaf_count: 0,
            _hasher: PhantomData,
        }
    }

    /// Number of inserted entries.
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    /// Whether nothing was inserted yet.
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Number of nodes, leaves and aggregates together.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Packed node colors.
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Key of the last inserted leaf.
    pub fn last_key(&self) -> Option<u64> {
        self.last_leaf_key
    }

    /// Digest stored at the root.
    pub fn root_hash(&self) -> Option<CryptoHash> {
        self.root.map(|root| self.node(root).digest)
    }

    /// Key stored at the root.
    pub fn root_key(&self) -> Option<u64> {
        self.root.map(|root| self.node(root).key)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Whether a leaf with this key was inserted.
    pub fn contains(&self, key: u64) -> bool {
        self.find_leaf(key).unwrap().is_some()
    }

    /// Digest stored in the leaf with this key.
    pub fn leaf_digest(&self, key: u64) -> Option<CryptoHash> {
        self.find_leaf(key)
            .unwrap()
            .map(|id| self.node(id).digest)
    }

    /// Descends from the root comparing keys. Finds leaves and aggregates
    /// alike.
    pub(crate) fn find(&self, key: u64) -> CostContext<Option<NodeId>> {
        let mut cost = OperationCost::default();
        let mut cursor = self.root;
        while let Some(id) = cursor {
            cost.seek_count += 1;
            let node = self.node(id);
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        cursor.wrap_with_cost(cost)
    }

    pub(crate) fn find_leaf(&self, key: u64) -> CostContext<Option<NodeId>> {
        self.find(key)
            .map(|found| found.filter(|id| self.node(*id).kind == NodeKind::Leaf))
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Color of a node; an absent node counts as black.
    pub(crate) fn color(&self, id: Option<NodeId>) -> Color {
        id.and_then(|id| self.colors.get(self.node(id).slot))
            .unwrap_or(Color::Black)
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        let slot = self.node(id).slot;
        self.colors.set(slot, color);
    }

    /// Appends a detached node to the arena, reserving its color slot.
    fn alloc(&mut self, kind: NodeKind, key: u64, digest: CryptoHash) -> Result<NodeId> {
        let slot = ColorTable::slot_for(key, self.config.half_scaling())
            .ok_or(Error::Overflow("color slot does not fit in usize"))?;
        if self.colors.ensure(slot) {
            tracing::trace!(slot, capacity = self.colors.capacity(), "color table grew");
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            kind,
            digest,
            slot,
            left: None,
            right: None,
            parent: None,
        });
        Ok(id)
    }
}

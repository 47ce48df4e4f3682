//! Insertion at the right frontier.

use mrbt_costs::{
    cost_return_on_error, cost_return_on_error_no_add, CostContext, CostResult, CostsExt,
    OperationCost,
};
use tracing::debug;

use super::{MerkleRbTree, NodeId, NodeKind};
use crate::{
    color::{Color, ColorTable},
    hash::{CryptoHash, NodeHasher, NULL_HASH},
    Error, Result,
};

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Inserts the digest of one message under `key`.
    ///
    /// `key` must be a multiple of the scaling factor and greater than every
    /// key inserted before, and must not skip more than
    /// [`MAX_GROWTH_SLOTS`](crate::color::MAX_GROWTH_SLOTS) color slots past
    /// the table; otherwise an error is returned and the tree is left
    /// untouched. The leaf is attached at the right frontier and the
    /// tree rebalanced and re-merkled, then an aggregate node keyed
    /// `key + scaling / 2` is attached and rebalanced the same way. The
    /// aggregate's digest becomes meaningful once it has two children.
    pub fn insert(&mut self, digest: CryptoHash, key: u64) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();

        let aggregate_key = cost_return_on_error_no_add!(&cost, self.check_insert_key(key));

        let leaf = cost_return_on_error_no_add!(&cost, self.alloc(NodeKind::Leaf, key, digest));
        self.place_at_frontier(leaf).unwrap_add_cost(&mut cost);
        cost_return_on_error!(&mut cost, self.rebalance(leaf));
        self.remerkle().unwrap_add_cost(&mut cost);

        let aggregate = cost_return_on_error_no_add!(
            &cost,
            self.alloc(NodeKind::Aggregate, aggregate_key, NULL_HASH)
        );
        self.place_at_frontier(aggregate).unwrap_add_cost(&mut cost);
        cost_return_on_error!(&mut cost, self.rebalance(aggregate));
        if self.config.remerkle_after_aggregate {
            self.remerkle().unwrap_add_cost(&mut cost);
        }

        self.last_leaf_key = Some(key);
        self.leaf_count += 1;

        debug!(
            key,
            entries = self.leaf_count,
            nodes = self.nodes.len(),
            seeks = cost.seek_count,
            hashes = cost.hash_node_calls,
            rotations = cost.rotation_count,
            "inserted entry"
        );

        Ok(()).wrap_with_cost(cost)
    }

    /// Validates `key` against the append-only contract and returns the key
    /// of its aggregate node.
    fn check_insert_key(&self, key: u64) -> Result<u64> {
        let scaling_factor = self.config.scaling_factor;
        if key % scaling_factor != 0 {
            return Err(Error::KeyAlignmentError {
                key,
                scaling_factor,
            });
        }
        if let Some(last) = self.last_leaf_key {
            if key <= last {
                return Err(Error::KeyOrderingError { key, last });
            }
        }
        let aggregate_key = key
            .checked_add(self.config.half_scaling())
            .ok_or(Error::Overflow("aggregate key exceeds u64"))?;
        let slot = ColorTable::slot_for(aggregate_key, self.config.half_scaling())
            .ok_or(Error::Overflow("color slot does not fit in usize"))?;
        if !self.colors.can_grow_to(slot) {
            return Err(Error::Overflow("key leaves too wide a gap in the color table"));
        }
        Ok(aggregate_key)
    }

    /// Attaches a detached node as the right child of the rightmost node, or
    /// makes it the black root of an empty tree. New non-root nodes are red.
    ///
    /// Only right children are followed: every new key is larger than all
    /// existing ones.
    pub(super) fn place_at_frontier(&mut self, id: NodeId) -> CostContext<()> {
        let mut cost = OperationCost::default();
        let Some(root) = self.root else {
            self.root = Some(id);
            self.set_color(id, Color::Black);
            return ().wrap_with_cost(cost);
        };

        let mut cursor = root;
        cost.seek_count += 1;
        while let Some(right) = self.node(cursor).right {
            cursor = right;
            cost.seek_count += 1;
        }

        self.node_mut(cursor).right = Some(id);
        self.node_mut(id).parent = Some(cursor);
        self.set_color(id, Color::Red);
        ().wrap_with_cost(cost)
    }
}

use mrbt_costs::{CostContext, CostsExt, OperationCost};
use tracing::trace;

use super::{MerkleRbTree, NodeId};
use crate::hash::NodeHasher;

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Recomputes `H(right ++ left)` for every node with two children,
    /// children first.
    ///
    /// Runs over the whole tree, so an insertion costs O(n) digests. A node
    /// missing a child keeps its digest and its subtree is not descended
    /// into.
    pub(super) fn remerkle(&mut self) -> CostContext<()> {
        let mut cost = OperationCost::default();
        if let Some(root) = self.root {
            self.remerkle_node(root, &mut cost);
        }
        trace!(hashes = cost.hash_node_calls, "re-merkled tree");
        ().wrap_with_cost(cost)
    }

    fn remerkle_node(&mut self, id: NodeId, cost: &mut OperationCost) {
        let Some((left, right)) = self.node(id).children() else {
            return;
        };
        self.remerkle_node(right, cost);
        self.remerkle_node(left, cost);

        let digest = H::combine(&self.node(right).digest, &self.node(left).digest);
        cost.hash_node_calls += 1;
        self.node_mut(id).digest = digest;
    }
}

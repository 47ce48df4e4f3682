//! Membership verification by recomputing the path to the root.

use mrbt_costs::{CostContext, CostsExt, OperationCost};
use tracing::trace;

use super::MerkleRbTree;
use crate::hash::{CryptoHash, NodeHasher};

/// Outcome of checking a `(digest, key)` pair against the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The leaf holds the digest and every ancestor digest is consistent
    /// with its children up to the root.
    Verified,
    /// No leaf has this key.
    KeyNotFound,
    /// The leaf exists but stores a different digest.
    LeafMismatch,
    /// The ancestor with this key does not hash to `H(right ++ left)` of its
    /// children.
    AncestorMismatch { key: u64 },
    /// The ancestor with this key is missing a child, so its digest cannot be
    /// recomputed.
    IncompleteAncestor { key: u64 },
}

impl Verification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified)
    }
}

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Whether `digest` was inserted under `key` and the tree above it is
    /// intact. Never modifies the tree.
    pub fn verify(&self, digest: &CryptoHash, key: u64) -> CostContext<bool> {
        self.check(digest, key).map(|outcome| outcome.is_verified())
    }

    /// Like [`verify`](MerkleRbTree::verify) but reports which check failed.
    pub fn check(&self, digest: &CryptoHash, key: u64) -> CostContext<Verification> {
        let mut cost = OperationCost::default();

        let Some(mut cursor) = self.find_leaf(key).unwrap_add_cost(&mut cost) else {
            return Verification::KeyNotFound.wrap_with_cost(cost);
        };
        if self.node(cursor).digest != *digest {
            return Verification::LeafMismatch.wrap_with_cost(cost);
        }

        while let Some(parent) = self.parent(cursor) {
            let ancestor = self.node(parent);
            let Some((left, right)) = ancestor.children() else {
                trace!(key, ancestor = ancestor.key, "ancestor is missing a child");
                return Verification::IncompleteAncestor { key: ancestor.key }.wrap_with_cost(cost);
            };
            let expected = H::combine(&self.node(right).digest, &self.node(left).digest);
            cost.hash_node_calls += 1;
            if expected != ancestor.digest {
                trace!(key, ancestor = ancestor.key, "ancestor digest mismatch");
                return Verification::AncestorMismatch { key: ancestor.key }.wrap_with_cost(cost);
            }
            cursor = parent;
        }

        Verification::Verified.wrap_with_cost(cost)
    }
}

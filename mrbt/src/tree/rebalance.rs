//! Red-black fixup specialized to right-frontier insertion.
//!
//! Only a left rotation exists. The case analysis covers what a strictly
//! increasing key stream produces; it is not a general red-black insertion
//! fixup. A red parent under a black uncle where the parent or the node has a
//! red left child is not handled, and the fixup stops there instead of
//! looping. [`MerkleRbTree::audit`] reports whether the classical invariants
//! hold for a given tree.

use mrbt_costs::{CostResult, CostsExt, OperationCost};
use tracing::{trace, warn};

use super::{MerkleRbTree, NodeId};
use crate::{color::Color, hash::NodeHasher, Error, Result};

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Restores balance on the path from a freshly placed node upward.
    pub(super) fn rebalance(&mut self, mut node: NodeId) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();

        loop {
            let Some(parent) = self.parent(node) else {
                break;
            };
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            if self.color(Some(parent)) != Color::Red {
                break;
            }

            let uncle = self.node(grandparent).left;
            let parent_left = self.node(parent).left;

            if uncle.is_none() && parent_left.is_none() {
                // degenerating into a right chain
                if let Err(e) = self.rotate_left(node) {
                    return Err(e).wrap_with_cost(cost);
                }
                cost.rotation_count += 1;
            } else if self.color(uncle).is_red() {
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(parent, Color::Black);
                let grandparent_color = if self.root() == Some(grandparent) {
                    Color::Black
                } else {
                    Color::Red
                };
                self.set_color(grandparent, grandparent_color);
                trace!(
                    key = self.node(node).key,
                    grandparent = self.node(grandparent).key,
                    "recolored under red uncle"
                );
                node = grandparent;
            } else if self.color(parent_left) == Color::Black
                && self.color(self.node(node).left) == Color::Black
            {
                if let Err(e) = self.rotate_left(node) {
                    return Err(e).wrap_with_cost(cost);
                }
                cost.rotation_count += 1;
            } else {
                warn!(
                    key = self.node(node).key,
                    parent = self.node(parent).key,
                    "no rebalance case applies to red parent with black uncle"
                );
                break;
            }
        }

        Ok(()).wrap_with_cost(cost)
    }

    /// Rotates left around `x`, whose parent `p` takes the place of its
    /// grandparent `g`. `p`'s former left subtree becomes `g`'s right subtree
    /// and `g` becomes `p`'s left child. Recolors `p` black, `x` and `g` red.
    pub(super) fn rotate_left(&mut self, x: NodeId) -> Result<()> {
        let p = self
            .parent(x)
            .ok_or(Error::CorruptionError("rotation pivot has no parent"))?;
        let g = self
            .parent(p)
            .ok_or(Error::CorruptionError("rotation pivot has no grandparent"))?;

        match self.parent(g) {
            None => {
                self.root = Some(p);
                self.node_mut(p).parent = None;
            }
            Some(above) => {
                let slot = if self.node(above).right == Some(g) {
                    &mut self.node_mut(above).right
                } else {
                    &mut self.node_mut(above).left
                };
                *slot = Some(p);
                self.node_mut(p).parent = Some(above);
            }
        }

        let inner = self.node(p).left;
        self.node_mut(g).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(g);
        }
        self.node_mut(p).left = Some(g);
        self.node_mut(g).parent = Some(p);

        self.set_color(p, Color::Black);
        self.set_color(x, Color::Red);
        self.set_color(g, Color::Red);

        trace!(
            pivot = self.node(p).key,
            lowered = self.node(g).key,
            "rotated left"
        );
        Ok(())
    }
}

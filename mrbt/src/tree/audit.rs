use super::{MerkleRbTree, NodeId};
use crate::{color::Color, hash::NodeHasher};

/// Measurement of the classical red-black invariants over a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedBlackAudit {
    /// Number of nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Black nodes on every root-to-nil path, `None` if paths disagree.
    pub black_height: Option<usize>,
    /// Red nodes that have a red child.
    pub red_red_violations: usize,
    pub root_is_black: bool,
}

impl RedBlackAudit {
    /// All classical red-black invariants hold.
    pub fn is_red_black(&self) -> bool {
        self.root_is_black && self.red_red_violations == 0 && self.black_height.is_some()
    }
}

impl<H: NodeHasher> MerkleRbTree<H> {
    /// Checks the tree against the classical red-black invariants.
    ///
    /// The rebalancer only guarantees them for the append-only workload it
    /// is built for.
    pub fn audit(&self) -> RedBlackAudit {
        let mut audit = RedBlackAudit {
            height: 0,
            black_height: None,
            red_red_violations: 0,
            root_is_black: self.root.is_none() || self.color(self.root) == Color::Black,
        };
        let mut uniform = true;
        let mut stack: Vec<(Option<NodeId>, usize, usize)> = vec![(self.root, 0, 0)];

        while let Some((id, depth, blacks)) = stack.pop() {
            let Some(id) = id else {
                // a nil leaf counts as black
                let blacks = blacks + 1;
                match audit.black_height {
                    None if uniform => audit.black_height = Some(blacks),
                    Some(expected) if expected != blacks => {
                        uniform = false;
                        audit.black_height = None;
                    }
                    _ => {}
                }
                continue;
            };

            let depth = depth + 1;
            audit.height = audit.height.max(depth);
            let node = self.node(id);
            let color = self.color(Some(id));
            if color.is_red()
                && (self.color(node.left).is_red() || self.color(node.right).is_red())
            {
                audit.red_red_violations += 1;
            }
            let blacks = blacks + usize::from(color == Color::Black);
            stack.push((node.left, depth, blacks));
            stack.push((node.right, depth, blacks));
        }

        audit
    }
}

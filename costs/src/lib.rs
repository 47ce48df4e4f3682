#![deny(missing_docs)]
//! Cost accounting for tree operations.
//!
//! Every mutation or lookup on the tree reports how much work it did: how
//! many nodes it walked through, how many node digests it recomputed and how
//! many rotations the rebalancer applied. Values travel together with their
//! cost inside a [`CostContext`].

mod context;

use std::ops::AddAssign;

pub use context::{CostContext, CostResult, CostsExt};

/// Work performed by a tree operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many nodes were visited while descending the tree.
    pub seek_count: u32,
    /// How many times two child digests were combined into a parent digest.
    pub hash_node_calls: u32,
    /// How many left rotations the rebalancer applied.
    pub rotation_count: u32,
}

impl OperationCost {
    /// Cost of visiting `seek_count` nodes and nothing else.
    pub fn with_seek_count(seek_count: u32) -> Self {
        OperationCost {
            seek_count,
            ..Default::default()
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.seek_count += rhs.seek_count;
        self.hash_node_calls += rhs.hash_node_calls;
        self.rotation_count += rhs.rotation_count;
    }
}

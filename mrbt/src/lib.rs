//! Authenticated, order-preserving collection of message digests.
//!
//! A [`MerkleRbTree`] is an append-only binary search tree whose internal
//! nodes double as Merkle aggregation points. Each insertion adds a leaf with
//! the caller's digest plus a synthetic aggregate node at the midpoint to the
//! next leaf key, rebalances the tree red-black style and recomputes the
//! aggregate digests as `H(right ++ left)`.
//! [`verify`](MerkleRbTree::verify) finds a leaf by key, compares its digest
//! and re-validates every ancestor up to the root.
//!
//! ```
//! use mrbt::{MerkleRbTree, NodeHasher, Sha256Hasher};
//!
//! let mut tree = MerkleRbTree::new();
//! for (i, message) in [b"A", b"B", b"C"].iter().enumerate() {
//!     tree.insert(Sha256Hasher::digest(*message), i as u64 * 100)
//!         .unwrap()
//!         .expect("keys are increasing");
//! }
//! assert!(tree.verify(&Sha256Hasher::digest(b"B"), 100).unwrap());
//! assert!(!tree.verify(&Sha256Hasher::digest(b"Bx"), 100).unwrap());
//! ```
//!
//! All operations report their [`OperationCost`]: nodes visited, digests
//! combined and rotations applied.

pub mod color;
mod config;
mod error;
pub mod hash;
#[cfg(test)]
mod test_utils;
mod tree;
pub mod visualize;

pub use config::{TreeConfig, DEFAULT_SCALING_FACTOR};
pub use error::{Error, Result};
pub use hash::{Blake3Hasher, CryptoHash, NodeHasher, Sha256Hasher, HASH_LENGTH, NULL_HASH};
pub use mrbt_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use tree::{MerkleRbTree, NodeId, NodeKind, RedBlackAudit, Verification};

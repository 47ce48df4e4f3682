//! Test utils

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    hash::{CryptoHash, NodeHasher, Sha256Hasher},
    tree::{MerkleRbTree, NodeId, NodeKind},
};

/// Digest of a small test message.
pub fn digest_of(message: &[u8]) -> CryptoHash {
    Sha256Hasher::digest(message)
}

/// Digest for the `n`-th sequential entry.
pub fn seq_digest(n: u64) -> CryptoHash {
    Sha256Hasher::digest(&n.to_be_bytes())
}

/// Tree with `count` sequential entries under keys `0, 100, 200, ...`.
pub fn make_tree_seq(count: u64) -> MerkleRbTree {
    let mut tree = MerkleRbTree::new();
    for n in 0..count {
        tree.insert(seq_digest(n), n * 100)
            .unwrap()
            .expect("sequential insert should succeed");
    }
    assert_tree_invariants(&tree);
    tree
}

/// Random capital-letter messages, as produced by the demo driver.
pub fn make_messages_rand(count: usize, max_len: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..max_len);
            (0..len).map(|_| rng.gen_range(b'A'..=b'Z')).collect()
        })
        .collect()
}

/// Assert tree invariants: parent links mirror child links, keys are in
/// search-tree order, every node is reachable and the root is black.
pub fn assert_tree_invariants<H: NodeHasher>(tree: &MerkleRbTree<H>) {
    let Some(root) = tree.root() else {
        assert_eq!(tree.node_count(), 0);
        return;
    };
    assert_eq!(tree.parent(root), None);
    assert!(!tree.color(Some(root)).is_red(), "root must be black");

    let mut visited = 0;
    let mut stack: Vec<(NodeId, Option<u64>, Option<u64>)> = vec![(root, None, None)];
    while let Some((id, lower, upper)) = stack.pop() {
        visited += 1;
        let node = tree.node(id);
        if let Some(lower) = lower {
            assert!(node.key > lower, "key {} not above {}", node.key, lower);
        }
        if let Some(upper) = upper {
            assert!(node.key < upper, "key {} not below {}", node.key, upper);
        }
        if let Some(left) = node.left {
            assert_eq!(tree.parent(left), Some(id));
            stack.push((left, lower, Some(node.key)));
        }
        if let Some(right) = node.right {
            assert_eq!(tree.parent(right), Some(id));
            stack.push((right, Some(node.key), upper));
        }
    }
    assert_eq!(visited, tree.node_count());
}

/// Replays the re-merkle rule independently and returns the digest it
/// yields for the root.
pub fn replay_root_digest<H: NodeHasher>(tree: &MerkleRbTree<H>) -> Option<CryptoHash> {
    fn replay<H: NodeHasher>(tree: &MerkleRbTree<H>, id: NodeId) -> CryptoHash {
        let node = tree.node(id);
        match (node.left, node.right) {
            (Some(left), Some(right)) => H::combine(&replay(tree, right), &replay(tree, left)),
            _ => node.digest,
        }
    }
    tree.root().map(|root| replay(tree, root))
}

/// Keys of all nodes of the given kind, in order.
pub fn keys_of_kind<H: NodeHasher>(tree: &MerkleRbTree<H>, kind: NodeKind) -> Vec<u64> {
    fn walk<H: NodeHasher>(
        tree: &MerkleRbTree<H>,
        id: Option<NodeId>,
        kind: NodeKind,
        out: &mut Vec<u64>,
    ) {
        let Some(id) = id else { return };
        let node = tree.node(id);
        walk(tree, node.left, kind, out);
        if node.kind == kind {
            out.push(node.key);
        }
        walk(tree, node.right, kind, out);
    }
    let mut keys = Vec::new();
    walk(tree, tree.root(), kind, &mut keys);
    keys
}

//! Digest function used for leaves and for combining child digests.

use sha2::{Digest, Sha256};

/// The length of a `CryptoHash` (in bytes).
pub const HASH_LENGTH: usize = 32;
pub const HASH_LENGTH_X2: usize = 64;

/// A zero-filled `CryptoHash`, carried by aggregate nodes until their first
/// re-merkle.
pub const NULL_HASH: CryptoHash = [0; HASH_LENGTH];

/// A cryptographic hash digest.
pub type CryptoHash = [u8; HASH_LENGTH];

/// Deterministic, unkeyed 32-byte hash function.
pub trait NodeHasher {
    /// Hashes arbitrary bytes.
    fn digest(bytes: &[u8]) -> CryptoHash;

    /// Digest of an aggregate node: `H(right ++ left)`.
    ///
    /// The right child comes first. There is no domain tag.
    fn combine(right: &CryptoHash, left: &CryptoHash) -> CryptoHash {
        let mut buf = [0u8; HASH_LENGTH_X2];
        buf[..HASH_LENGTH].copy_from_slice(right);
        buf[HASH_LENGTH..].copy_from_slice(left);
        Self::digest(&buf)
    }
}

/// SHA-256, the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl NodeHasher for Sha256Hasher {
    fn digest(bytes: &[u8]) -> CryptoHash {
        Sha256::digest(bytes).into()
    }

    fn combine(right: &CryptoHash, left: &CryptoHash) -> CryptoHash {
        let mut hasher = Sha256::new();
        hasher.update(right);
        hasher.update(left);
        hasher.finalize().into()
    }
}

/// Blake3 with the same contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl NodeHasher for Blake3Hasher {
    fn digest(bytes: &[u8]) -> CryptoHash {
        *blake3::hash(bytes).as_bytes()
    }

    fn combine(right: &CryptoHash, left: &CryptoHash) -> CryptoHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(right);
        hasher.update(left);
        *hasher.finalize().as_bytes()
    }
}

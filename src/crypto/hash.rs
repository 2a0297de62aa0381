//! Double SHA-256 hashing
//!
//! Block headers, transaction ids and merkle nodes are all hashed with
//! SHA-256 applied twice. Digests are stored in internal (little-endian)
//! byte order and displayed as big-endian hex.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte hash output
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Create a zero hash (used for genesis previous hash)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Create hash from bytes in internal order
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Parse the conventional big-endian display form.
    ///
    /// A leading `0x` is accepted and short inputs are left-padded with
    /// zeros, so `"0x1"` is the hash with value one.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.len() > 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let padded = format!("{:0>64}", hex);
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&padded, &mut arr)?;
        arr.reverse();
        Ok(Hash(arr))
    }

    /// Convert to big-endian hex string
    pub fn to_hex(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

/// Hash arbitrary bytes with SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash(second.into())
}

/// Hash two hashes together (for Merkle tree)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    double_sha256(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"hello world";
        assert_eq!(double_sha256(data), double_sha256(data));
    }

    #[test]
    fn test_double_sha256_known_vector() {
        // sha256d("") is a well known constant
        let hash = double_sha256(b"");
        assert_eq!(
            hex::encode(hash.0),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_zero_hash() {
        let zero = Hash::zero();
        assert_eq!(zero.0, [0u8; 32]);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_hex_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        let hash = Hash(bytes);
        assert!(hash.to_hex().ends_with("01"));
        assert!(hash.to_hex().starts_with("00"));
    }

    #[test]
    fn test_from_hex_short_form() {
        let one = Hash::from_hex("0x1").unwrap();
        assert_eq!(one.0[0], 1);
        assert!(one.0[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Hash::from_hex("zz").is_err());
        assert!(Hash::from_hex(&"0".repeat(66)).is_err());
    }

    #[test]
    fn test_hash_pair_order_matters() {
        let left = double_sha256(b"left");
        let right = double_sha256(b"right");
        assert_eq!(hash_pair(&left, &right), hash_pair(&left, &right));
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }
}

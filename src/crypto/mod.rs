//! Cryptography module - double SHA-256 hashing and Merkle trees

mod hash;
mod merkle;

pub use hash::*;
pub use merkle::*;

//! Chain Parameters Library
//!
//! The fixed, per-network constants a node is anchored to: genesis block
//! and its hash, checkpoints, wire magic, address prefixes, and seeds.
//! Every profile verifies its genesis block when built; a mismatch aborts.

pub mod consensus;
pub mod crypto;
pub mod p2p;
pub mod params;

pub use params::{
    modifiable_params, params, params_for, select_params, NetworkId, NetworkProfile,
};

/// Protocol constants
pub mod constants {
    /// Base units per coin (8 decimal places)
    pub const COIN: u64 = 100_000_000;

    /// One week in seconds
    pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;
}

//! Genesis block construction and verification
//!
//! Every network starts from the same coinbase. Only the header fields
//! (time, bits, nonce) differ per network, and each network pins the
//! resulting hash. The nonces were found offline; nothing here searches.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::NetworkId;
use crate::consensus::{Block, BlockHeader, Script, ScriptBuilder, Transaction, OP_CHECKSIG};
use crate::constants::COIN;
use crate::crypto::Hash;

/// Text embedded in the coinbase input
pub const GENESIS_TIMESTAMP_MESSAGE: &str =
    "Paolino Sbaraxxino is a gay midget, we all know this and there's no point in denying this.";

/// Uncompressed public key the genesis output pays to
pub const GENESIS_OUTPUT_PUBKEY: &str = "0454f55775312ac696061ee78bd06862d469aaf1e91be79165490c0ff9cc7539637769ce5c47432966e372810d95733d68f012253362d0a9158c3c5193ee6c39e9";

/// Genesis output value. Never spendable: it is not in any output set.
pub const GENESIS_REWARD: u64 = 50 * COIN;

/// Merkle root shared by every network's genesis block
pub const GENESIS_MERKLE_ROOT: &str =
    "df8464730301bcd20b5014c6e36d46c9848b4a16ec26d9b827682e2ad213a43d";

/// First item pushed by the coinbase script (the classic `0x1d00ffff`)
const COINBASE_BITS_PUSH: i64 = 486_604_799;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesis hash mismatch: expected {expected}, computed {actual}")]
    HashMismatch { expected: Hash, actual: Hash },
    #[error("genesis merkle root mismatch: expected {expected}, computed {actual}")]
    MerkleRootMismatch { expected: Hash, actual: Hash },
}

/// Header fields that vary between networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisParams {
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

/// Parse a hash constant compiled into the binary.
///
/// A malformed constant means the build itself is broken.
pub(crate) fn pinned_hash(hex: &str) -> Hash {
    Hash::from_hex(hex).unwrap_or_else(|e| panic!("invalid hash constant {hex:?}: {e}"))
}

/// The coinbase transaction of every genesis block
pub fn genesis_coinbase() -> Transaction {
    let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY)
        .unwrap_or_else(|e| panic!("invalid genesis output key constant: {e}"));

    let script_sig = ScriptBuilder::new()
        .push_int(COINBASE_BITS_PUSH)
        .push_num(4)
        .push_slice(GENESIS_TIMESTAMP_MESSAGE.as_bytes())
        .into_script();
    let script_pubkey: Script = ScriptBuilder::new()
        .push_slice(&pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_script();

    Transaction::coinbase(script_sig, GENESIS_REWARD, script_pubkey)
}

/// Create the genesis block
///
/// This function produces a reproducible, byte-for-byte identical genesis block.
pub fn build_genesis(params: &GenesisParams) -> Block {
    let mut block = Block::new(
        BlockHeader {
            version: params.version,
            prev_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: params.time,
            bits: params.bits,
            nonce: params.nonce,
        },
        vec![genesis_coinbase()],
    );
    block.header.merkle_root = block.build_merkle_root();
    block
}

/// Check a genesis block against its pinned hash and merkle root
pub fn verify_genesis(
    block: &Block,
    expected_hash: &Hash,
    expected_merkle_root: &Hash,
) -> Result<Hash, GenesisError> {
    let merkle_root = block.build_merkle_root();
    for actual in [merkle_root, block.header.merkle_root] {
        if actual != *expected_merkle_root {
            return Err(GenesisError::MerkleRootMismatch {
                expected: *expected_merkle_root,
                actual,
            });
        }
    }

    let hash = block.hash();
    if hash != *expected_hash {
        return Err(GenesisError::HashMismatch {
            expected: *expected_hash,
            actual: hash,
        });
    }
    Ok(hash)
}

/// Build and verify, aborting on any mismatch.
///
/// A node whose genesis constants do not reproduce must not start.
pub fn expect_genesis(network: NetworkId, params: &GenesisParams, expected_hash: &str) -> (Block, Hash) {
    let block = build_genesis(params);
    let expected = pinned_hash(expected_hash);
    let merkle_root = pinned_hash(GENESIS_MERKLE_ROOT);

    match verify_genesis(&block, &expected, &merkle_root) {
        Ok(hash) => {
            debug!(%network, %hash, "genesis block verified");
            (block, hash)
        }
        Err(e) => panic!("{network} {e}"),
    }
}

//! Property-based and adversarial tests for chain parameters
//!
//! These tests verify invariants hold under random inputs and against
//! forged constants.

use chainparams::consensus::{
    compact_to_target, target_to_compact, Block, BlockHeader, Script, Transaction,
};
use chainparams::constants::ONE_WEEK;
use chainparams::crypto::{double_sha256, Hash};
use chainparams::p2p::{materialize_seeds, seed_last_seen, SeedSpec};
use chainparams::params::{
    build_genesis, verify_genesis, CheckpointRegistry, GenesisError, GenesisParams,
    ParamsRegistry, GENESIS_MERKLE_ROOT,
};
use chainparams::NetworkId;
use primitive_types::U256;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Seed timestamps always land one to two weeks in the past
    #[test]
    fn prop_seed_last_seen_window(now in ONE_WEEK * 2..i64::MAX / 2, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = seed_last_seen(now, &mut rng);
        prop_assert!(t >= now - 2 * ONE_WEEK);
        prop_assert!(t <= now - ONE_WEEK);
    }

    /// Materialization preserves the address and port of every entry
    #[test]
    fn prop_materialize_preserves_entries(
        entries in prop::collection::vec((any::<[u8; 16]>(), any::<u16>()), 0..32),
        seed in any::<u64>()
    ) {
        let specs: Vec<SeedSpec> = entries
            .iter()
            .map(|(addr, port)| SeedSpec { addr: *addr, port: *port })
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let peers = materialize_seeds(&specs, 1_700_000_000, &mut rng);

        prop_assert_eq!(peers.len(), specs.len());
        for (peer, spec) in peers.iter().zip(&specs) {
            prop_assert_eq!(peer.addr, spec.socket_addr());
        }
    }

    /// A one-transaction block's merkle root is that transaction's id
    #[test]
    fn prop_single_tx_merkle_root(
        script_sig in prop::collection::vec(any::<u8>(), 0..100),
        script_pubkey in prop::collection::vec(any::<u8>(), 0..100),
        value in any::<u64>()
    ) {
        let tx = Transaction::coinbase(Script(script_sig), value, Script(script_pubkey));
        let header = BlockHeader {
            version: 1,
            prev_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: 0,
            bits: 0x1e0ffff0,
            nonce: 0,
        };
        let block = Block::new(header, vec![tx.clone()]);
        prop_assert_eq!(block.build_merkle_root(), tx.txid());
    }

    /// Display hex parses back to the same hash
    #[test]
    fn prop_hash_hex_roundtrip(bytes in any::<[u8; 32]>()) {
        let hash = Hash(bytes);
        prop_assert_eq!(Hash::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    /// Unpinned heights never conflict with anything
    #[test]
    fn prop_unpinned_heights_accept_any_hash(height in 1u32..u32::MAX, bytes in any::<[u8; 32]>()) {
        let registry = CheckpointRegistry::new(&[(0, double_sha256(b"genesis"))], 0, 0, 0.0).unwrap();
        prop_assert_eq!(registry.get(height), None);
        prop_assert!(registry.check(height, &Hash(bytes)));
    }

    /// Compact encoding only ever truncates a target, never grows it
    #[test]
    fn prop_compact_truncates(mantissa in 1u64..u64::MAX, shift in 0usize..190) {
        let target = U256::from(mantissa) << shift;
        let decoded = compact_to_target(target_to_compact(target)).unwrap();
        prop_assert!(decoded <= target);
        prop_assert!(!decoded.is_zero());
    }
}

// ============================================================================
// ADVERSARIAL TESTS
// ============================================================================

/// Test: Forged genesis timestamp
///
/// A block that differs from the pinned genesis in any header field must
/// not verify against the pinned hash.
#[test]
fn test_forged_genesis_time_rejected() {
    let registry = ParamsRegistry::new();
    let main = registry.lookup(NetworkId::Main);
    let expected_root = Hash::from_hex(GENESIS_MERKLE_ROOT).unwrap();

    let forged = build_genesis(&GenesisParams {
        version: main.genesis.header.version,
        time: main.genesis.header.time + 1,
        bits: main.genesis.header.bits,
        nonce: main.genesis.header.nonce,
    });

    assert!(matches!(
        verify_genesis(&forged, &main.hash_genesis_block, &expected_root),
        Err(GenesisError::HashMismatch { .. })
    ));
}

/// Test: Extra transaction smuggled into genesis
#[test]
fn test_genesis_with_extra_transaction_rejected() {
    let registry = ParamsRegistry::new();
    let main = registry.lookup(NetworkId::Main);
    let expected_root = Hash::from_hex(GENESIS_MERKLE_ROOT).unwrap();

    let mut forged = main.genesis.clone();
    forged
        .transactions
        .push(Transaction::coinbase(Script(vec![0x51]), 1, Script(vec![0x51])));

    assert!(matches!(
        verify_genesis(&forged, &main.hash_genesis_block, &expected_root),
        Err(GenesisError::MerkleRootMismatch { .. })
    ));
}

/// Test: Cross-network genesis
///
/// One network's genesis must never verify as another's.
#[test]
fn test_genesis_hashes_distinct_per_network() {
    let registry = ParamsRegistry::new();
    let main = registry.lookup(NetworkId::Main);
    let test = registry.lookup(NetworkId::Test);
    let regtest = registry.lookup(NetworkId::RegTest);

    assert_ne!(main.hash_genesis_block, test.hash_genesis_block);
    assert_ne!(main.hash_genesis_block, regtest.hash_genesis_block);
    assert_ne!(test.hash_genesis_block, regtest.hash_genesis_block);
    assert!(!main.checkpoints.check(0, &test.hash_genesis_block));
}

/// Test: Every network reproduces its pinned genesis
#[test]
fn test_every_network_genesis_reproduces() {
    let registry = ParamsRegistry::new();
    let expected_root = Hash::from_hex(GENESIS_MERKLE_ROOT).unwrap();

    for id in NetworkId::ALL {
        let profile = registry.lookup(id);
        let rebuilt = build_genesis(&GenesisParams {
            version: profile.genesis.header.version,
            time: profile.genesis.header.time,
            bits: profile.genesis.header.bits,
            nonce: profile.genesis.header.nonce,
        });
        let hash = verify_genesis(&rebuilt, &profile.hash_genesis_block, &expected_root)
            .unwrap_or_else(|e| panic!("{id}: {e}"));
        assert_eq!(profile.checkpoints.get(0), Some(hash));
    }
}

/// Test: Checkpoint heights strictly increase in every profile
#[test]
fn test_checkpoint_heights_increasing() {
    let registry = ParamsRegistry::new();
    for id in NetworkId::ALL {
        let heights: Vec<u32> = registry.lookup(id).checkpoints.iter().map(|(h, _)| h).collect();
        assert_eq!(heights[0], 0);
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
    }
}

//! Network profiles
//!
//! Main is written out in full. Every other network starts from a copy of
//! its base profile and overrides what differs, so each profile is an
//! independent value once built.

use primitive_types::U256;
use rand::thread_rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{expect_genesis, Base58Prefixes, Base58Type, CheckpointRegistry, GenesisParams, NetworkId};
use crate::consensus::{pow_limit, Block};
use crate::constants::COIN;
use crate::crypto::Hash;
use crate::p2p::{
    materialize_seeds, unix_now, DnsSeed, SeedAddress, SeedSpec, MAIN_FIXED_SEEDS, TEST_FIXED_SEEDS,
};

const MAIN_GENESIS_HASH: &str = "00000470156451f21d8d0d112f969b24c8cc2816a7af09883056c638fe11bd2f";
const TEST_GENESIS_HASH: &str = "00000de1aa960de6457ea80101754eae31b75e6a16fff375950f8af5a72deb1e";
const REGTEST_GENESIS_HASH: &str =
    "000007e009ee03d76a8d3eb444d072945efa29f0e1817cb5ad2dc317f1f988f3";

/// Boolean behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileFlags {
    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    pub allow_min_difficulty_blocks: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
    pub headers_first_syncing_active: bool,
}

/// Everything that distinguishes one network from another
#[derive(Debug, Clone, Serialize)]
pub struct NetworkProfile {
    pub network_id: NetworkId,
    pub name: &'static str,
    /// Prefix of every wire message
    pub message_start: [u8; 4],
    pub alert_pubkey: &'static str,
    pub default_port: u16,

    pub pow_limit: U256,
    pub subsidy_halving_interval: u32,
    pub max_reorganization_depth: u32,
    pub enforce_block_upgrade_majority: u32,
    pub reject_block_outdated_majority: u32,
    pub to_check_block_upgrade_majority: u32,
    pub miner_threads: u32,
    /// Seconds
    pub target_timespan: i64,
    /// Seconds
    pub target_spacing: i64,
    pub last_pow_block: u32,
    pub coinbase_maturity: u32,
    pub max_money_out: u64,

    pub masternode_count_drift: u32,
    pub masternode_collateral_limit: u64,
    pub modifier_update_block: u32,
    pub pool_max_transactions: u32,
    pub start_masternode_payments: i64,

    pub genesis: Block,
    pub hash_genesis_block: Hash,

    pub base58_prefixes: Base58Prefixes,
    /// Shared so profiles that reuse a table point at the same one
    pub checkpoints: Arc<CheckpointRegistry>,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: &'static [SeedSpec],
    pub flags: ProfileFlags,

    pub spork_key: &'static str,
    pub obfuscation_pool_dummy_address: &'static str,
}

impl NetworkProfile {
    /// The production network
    pub fn main() -> Self {
        let genesis_params = GenesisParams {
            version: 1,
            time: 1537201858,
            bits: 0x1e0ffff0,
            nonce: 1787364,
        };
        let (genesis, hash_genesis_block) =
            expect_genesis(NetworkId::Main, &genesis_params, MAIN_GENESIS_HASH);

        let checkpoints = Arc::new(build_checkpoints(
            NetworkId::Main,
            &[(0, hash_genesis_block)],
            1537201858,
            0,
            2000.0,
        ));

        let profile = Self {
            network_id: NetworkId::Main,
            name: NetworkId::Main.as_str(),
            message_start: [0x69, 0x7b, 0xcf, 0x5d],
            alert_pubkey: "043d3bf343c04b9bb4e1b51040a299018c7cc3c94000532c5509a4f05acfe9485728bb8a41e24d789f459448cfad6795b24d870762e70c88d476277745b19771dd",
            default_port: 38349,

            pow_limit: pow_limit(20),
            subsidy_halving_interval: 210_000,
            max_reorganization_depth: 100,
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            miner_threads: 0,
            target_timespan: 60,
            target_spacing: 60,
            last_pow_block: 200,
            coinbase_maturity: 45,
            max_money_out: 60_000_001 * COIN,

            masternode_count_drift: 20,
            masternode_collateral_limit: 50_000,
            modifier_update_block: 615_800,
            pool_max_transactions: 3,
            start_masternode_payments: 1537201858,

            genesis,
            hash_genesis_block,

            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![30],
                script_address: vec![83],
                secret_key: vec![174],
                ext_public_key: vec![0x02, 0x2d, 0x25, 0x33],
                ext_secret_key: vec![0x02, 0x21, 0x31, 0x2b],
                ext_coin_type: vec![0x80, 0x00, 0x00, 0x77],
            },
            checkpoints,
            dns_seeds: vec![
                DnsSeed::new("Node 1", "45.76.63.253"),
                DnsSeed::new("Node 2", "140.82.15.2"),
                DnsSeed::new("Node 3", "217.163.11.120"),
            ],
            fixed_seeds: MAIN_FIXED_SEEDS,
            flags: ProfileFlags {
                require_rpc_password: true,
                mining_requires_peers: false,
                allow_min_difficulty_blocks: false,
                default_consistency_checks: false,
                require_standard: true,
                mine_blocks_on_demand: false,
                skip_proof_of_work_check: false,
                testnet_to_be_deprecated_field_rpc: false,
                headers_first_syncing_active: false,
            },

            spork_key: "044fb43f95460fb4a663c4bd5a536bc12b0e4c50f71e61a89ef0907ecfa8ebc5776171e41957f6225626c18b99be1e4bde7eaa17746473b3acd0f985bc65baff8a",
            obfuscation_pool_dummy_address: "DPqRnqvRHKq8YmXkvYQV1AQmhSr4hzsXGA",
        };
        debug!(network = %profile.network_id, "built chain parameters");
        profile
    }

    /// Public test network, derived from main
    pub fn testnet(main: &NetworkProfile) -> Self {
        let mut p = main.clone();
        p.network_id = NetworkId::Test;
        p.name = NetworkId::Test.as_str();
        p.message_start = [0x41, 0x4d, 0x5e, 0x78];
        p.alert_pubkey = "043e8760d1c9ef3af5a5e49796afe4389a5cb53c6028b54b9af0a152f34762e453615a1aab9260a31045b85f87d4de36bbe6fd04478fcc103fd47c8e1b813c3d3c";
        p.default_port = 38349;
        p.enforce_block_upgrade_majority = 51;
        p.reject_block_outdated_majority = 75;
        p.to_check_block_upgrade_majority = 100;
        p.miner_threads = 0;
        p.target_timespan = 60;
        p.target_spacing = 60;
        p.last_pow_block = 200;
        p.coinbase_maturity = 15;
        p.masternode_count_drift = 4;
        p.masternode_collateral_limit = 1000;
        p.modifier_update_block = 51_197;
        p.max_money_out = 43_199_500 * COIN;

        p.reset_genesis(1536681360, 1040192, TEST_GENESIS_HASH);
        p.checkpoints = Arc::new(build_checkpoints(
            NetworkId::Test,
            &[(0, p.hash_genesis_block)],
            1533225982,
            0,
            250.0,
        ));

        p.dns_seeds.clear();
        p.fixed_seeds = TEST_FIXED_SEEDS;

        p.base58_prefixes = Base58Prefixes {
            pubkey_address: vec![139],
            script_address: vec![19],
            secret_key: vec![239],
            ext_public_key: vec![0x3a, 0x80, 0x61, 0xa0],
            ext_secret_key: vec![0x3a, 0x80, 0x58, 0x37],
            ext_coin_type: vec![0x80, 0x00, 0x00, 0x01],
        };

        p.flags = ProfileFlags {
            require_rpc_password: true,
            mining_requires_peers: false,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: false,
            require_standard: false,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: true,
            testnet_to_be_deprecated_field_rpc: true,
            ..main.flags
        };

        p.pool_max_transactions = 2;
        p.spork_key = "04cded1204a57acd6280c8499b7a2df052609dbf96546453984d632204d651d72a37013edc9d115e5a385e100eb7e867923fdd0bb7d9dc31aa1eb9d59b00c76697";
        p.obfuscation_pool_dummy_address = "xxVKdbxVogrXrPLMo2qEEyCm1GRv2KZCLy";
        p.start_masternode_payments = 1533225982;

        debug!(network = %p.network_id, "built chain parameters");
        p
    }

    /// Local regression-test network, derived from testnet
    pub fn regtest(test: &NetworkProfile) -> Self {
        let mut p = test.clone();
        p.network_id = NetworkId::RegTest;
        p.name = NetworkId::RegTest.as_str();
        p.message_start = [0x2d, 0x53, 0x6f, 0x40];
        p.subsidy_halving_interval = 150;
        p.enforce_block_upgrade_majority = 750;
        p.reject_block_outdated_majority = 950;
        p.to_check_block_upgrade_majority = 1000;
        p.miner_threads = 1;
        p.target_timespan = 24 * 60 * 60;
        p.target_spacing = 60;
        p.pow_limit = pow_limit(1);

        p.genesis.header.bits = 0x1e0ffff0;
        p.reset_genesis(1526202560, 2171451, REGTEST_GENESIS_HASH);
        p.checkpoints = Arc::new(build_checkpoints(
            NetworkId::RegTest,
            &[(0, p.hash_genesis_block)],
            1533225982,
            0,
            100.0,
        ));
        p.default_port = 39793;

        p.fixed_seeds = &[];
        p.dns_seeds.clear();

        p.flags = ProfileFlags {
            require_rpc_password: false,
            mining_requires_peers: false,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
            ..test.flags
        };

        debug!(network = %p.network_id, "built chain parameters");
        p
    }

    /// In-process unit-test network, derived from main.
    ///
    /// Shares main's checkpoint table rather than owning a copy.
    pub fn unittest(main: &NetworkProfile) -> Self {
        let mut p = main.clone();
        p.network_id = NetworkId::UnitTest;
        p.name = NetworkId::UnitTest.as_str();
        p.default_port = 39791;
        p.fixed_seeds = &[];
        p.dns_seeds.clear();
        p.checkpoints = Arc::clone(&main.checkpoints);

        p.flags = ProfileFlags {
            require_rpc_password: false,
            mining_requires_peers: false,
            default_consistency_checks: true,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: true,
            ..main.flags
        };

        debug!(network = %p.network_id, "built chain parameters");
        p
    }

    /// Rebuild this profile's genesis with a new time and nonce, then verify it
    fn reset_genesis(&mut self, time: u32, nonce: u32, expected_hash: &str) {
        let params = GenesisParams {
            version: self.genesis.header.version,
            time,
            bits: self.genesis.header.bits,
            nonce,
        };
        let (genesis, hash) = expect_genesis(self.network_id, &params, expected_hash);
        self.genesis = genesis;
        self.hash_genesis_block = hash;
    }

    pub fn genesis_hash(&self) -> Hash {
        self.hash_genesis_block
    }

    pub fn checkpoints(&self) -> &Arc<CheckpointRegistry> {
        &self.checkpoints
    }

    pub fn base58_prefix(&self, role: Base58Type) -> &[u8] {
        self.base58_prefixes.get(role)
    }

    /// Fixed seeds with randomized last-seen times as of now
    pub fn fixed_seed_addresses(&self) -> Vec<SeedAddress> {
        materialize_seeds(self.fixed_seeds, unix_now(), &mut thread_rng())
    }
}

fn build_checkpoints(
    network: NetworkId,
    entries: &[(u32, Hash)],
    last_checkpoint_time: i64,
    transactions_last_checkpoint: u64,
    transactions_per_day: f64,
) -> CheckpointRegistry {
    CheckpointRegistry::new(
        entries,
        last_checkpoint_time,
        transactions_last_checkpoint,
        transactions_per_day,
    )
    .unwrap_or_else(|e| panic!("{network} checkpoints: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::check_proof_of_work;
    use crate::params::GENESIS_MERKLE_ROOT;

    fn all() -> Vec<NetworkProfile> {
        let main = NetworkProfile::main();
        let test = NetworkProfile::testnet(&main);
        let regtest = NetworkProfile::regtest(&test);
        let unittest = NetworkProfile::unittest(&main);
        vec![main, test, regtest, unittest]
    }

    #[test]
    fn test_genesis_hashes_reproduce() {
        for p in all() {
            assert_eq!(p.genesis.hash(), p.hash_genesis_block, "{}", p.name);
            assert_eq!(p.genesis.build_merkle_root().to_hex(), GENESIS_MERKLE_ROOT);
            assert!(p.genesis.is_genesis());
        }
    }

    #[test]
    fn test_genesis_meets_own_target() {
        for p in all() {
            assert!(
                check_proof_of_work(&p.hash_genesis_block, p.genesis.header.bits, p.pow_limit),
                "{}",
                p.name
            );
        }
    }

    #[test]
    fn test_checkpoint_zero_is_genesis() {
        for p in all() {
            assert_eq!(p.checkpoints.get(0), Some(p.hash_genesis_block), "{}", p.name);
        }
    }

    #[test]
    fn test_testnet_overrides() {
        let main = NetworkProfile::main();
        let test = NetworkProfile::testnet(&main);

        assert_eq!(test.message_start, [0x41, 0x4d, 0x5e, 0x78]);
        assert_eq!(test.default_port, main.default_port);
        assert_eq!(test.base58_prefix(Base58Type::PubkeyAddress), &[139]);
        assert_eq!(test.coinbase_maturity, 15);
        assert_eq!(test.genesis.header.time, 1536681360);
        // inherited from main untouched
        assert_eq!(test.subsidy_halving_interval, main.subsidy_halving_interval);
        assert_eq!(test.pow_limit, main.pow_limit);
        assert!(test.dns_seeds.is_empty());
        assert!(test.flags.allow_min_difficulty_blocks);
        assert!(!test.flags.headers_first_syncing_active);
    }

    #[test]
    fn test_regtest_overrides() {
        let main = NetworkProfile::main();
        let test = NetworkProfile::testnet(&main);
        let regtest = NetworkProfile::regtest(&test);

        assert_eq!(regtest.default_port, 39793);
        assert_eq!(regtest.subsidy_halving_interval, 150);
        assert_eq!(regtest.target_timespan, 86_400);
        assert_eq!(regtest.pow_limit, pow_limit(1));
        assert!(regtest.flags.mine_blocks_on_demand);
        // inherited from testnet
        assert_eq!(regtest.base58_prefixes, test.base58_prefixes);
        assert_eq!(regtest.coinbase_maturity, test.coinbase_maturity);
        assert!(regtest.flags.skip_proof_of_work_check);
    }

    #[test]
    fn test_unittest_shares_main_checkpoints() {
        let main = NetworkProfile::main();
        let unittest = NetworkProfile::unittest(&main);

        assert!(Arc::ptr_eq(main.checkpoints(), unittest.checkpoints()));
        assert_eq!(unittest.hash_genesis_block, main.hash_genesis_block);
        assert_eq!(unittest.default_port, 39791);
        assert!(unittest.fixed_seeds.is_empty());
    }

    #[test]
    fn test_derived_profile_is_independent_copy() {
        let main = NetworkProfile::main();
        let mut unittest = NetworkProfile::unittest(&main);
        unittest.subsidy_halving_interval = 100;
        unittest.base58_prefixes.pubkey_address = vec![0];

        assert_eq!(main.subsidy_halving_interval, 210_000);
        assert_eq!(main.base58_prefix(Base58Type::PubkeyAddress), &[30]);
    }

    #[test]
    fn test_main_skips_no_pow_checks() {
        assert!(!NetworkProfile::main().flags.skip_proof_of_work_check);
    }

    #[test]
    fn test_magic_bytes_unique() {
        let profiles = all();
        let main = &profiles[0];
        for other in &profiles[1..3] {
            assert_ne!(main.message_start, other.message_start);
        }
    }

    #[test]
    fn test_fixed_seed_addresses() {
        let main = NetworkProfile::main();
        let seeds = main.fixed_seed_addresses();
        assert_eq!(seeds.len(), 3);
        assert!(seeds.iter().all(|s| s.addr.port() == main.default_port));
    }

    #[test]
    fn test_testnet_dummy_address_uses_testnet_prefix() {
        let main = NetworkProfile::main();
        let test = NetworkProfile::testnet(&main);
        let payload = test
            .base58_prefixes
            .decode_check(Base58Type::PubkeyAddress, test.obfuscation_pool_dummy_address)
            .unwrap();
        assert_eq!(payload.len(), 20);
    }
}

//! Parameter registry
//!
//! Holds the four pre-built profiles and which one is active. A process
//! selects its network once at startup; afterwards every query reads
//! through [`params`]. Asking before selecting is a programming error and
//! panics.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use super::{NetworkId, NetworkProfile};

pub struct ParamsRegistry {
    main: Arc<NetworkProfile>,
    test: Arc<NetworkProfile>,
    regtest: Arc<NetworkProfile>,
    /// The only slot that may change after construction
    unittest: RwLock<Arc<NetworkProfile>>,
    selected: RwLock<Option<NetworkId>>,
}

impl ParamsRegistry {
    /// Build and verify every profile. Nothing is selected yet.
    pub fn new() -> Self {
        let main = NetworkProfile::main();
        let test = NetworkProfile::testnet(&main);
        let regtest = NetworkProfile::regtest(&test);
        let unittest = NetworkProfile::unittest(&main);

        Self {
            main: Arc::new(main),
            test: Arc::new(test),
            regtest: Arc::new(regtest),
            unittest: RwLock::new(Arc::new(unittest)),
            selected: RwLock::new(None),
        }
    }

    /// Profile for `network`, regardless of selection
    pub fn lookup(&self, network: NetworkId) -> Arc<NetworkProfile> {
        match network {
            NetworkId::Main => Arc::clone(&self.main),
            NetworkId::Test => Arc::clone(&self.test),
            NetworkId::RegTest => Arc::clone(&self.regtest),
            NetworkId::UnitTest => Arc::clone(&self.unittest.read()),
        }
    }

    /// Make `network` the active profile
    pub fn select(&self, network: NetworkId) {
        let mut selected = self.selected.write();
        match *selected {
            Some(current) if current == network => return,
            Some(current) => warn!(from = %current, to = %network, "switching active network"),
            None => {}
        }
        *selected = Some(network);
        info!(%network, "selected chain parameters");
    }

    pub fn selected(&self) -> Option<NetworkId> {
        *self.selected.read()
    }

    /// The active profile
    ///
    /// # Panics
    /// If no network has been selected.
    pub fn active(&self) -> Arc<NetworkProfile> {
        match self.selected() {
            Some(network) => self.lookup(network),
            None => panic!("chain parameters requested before a network was selected"),
        }
    }

    /// Setters for the unit-test profile
    ///
    /// # Panics
    /// If the active network is not [`NetworkId::UnitTest`].
    pub fn mutable_view(&self) -> UnitTestParams<'_> {
        match self.selected() {
            Some(NetworkId::UnitTest) => UnitTestParams {
                slot: &self.unittest,
            },
            Some(other) => panic!("modifiable parameters requested while {other} is active"),
            None => panic!("modifiable parameters requested before a network was selected"),
        }
    }
}

impl Default for ParamsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Write access to the closed set of fields unit tests may change.
///
/// Updates are copy-on-write: snapshots handed out earlier keep their
/// values, later reads see the change.
pub struct UnitTestParams<'a> {
    slot: &'a RwLock<Arc<NetworkProfile>>,
}

impl UnitTestParams<'_> {
    fn update(&self, apply: impl FnOnce(&mut NetworkProfile)) {
        let mut slot = self.slot.write();
        apply(Arc::make_mut(&mut slot));
    }

    pub fn set_subsidy_halving_interval(&self, value: u32) {
        self.update(|p| p.subsidy_halving_interval = value);
    }

    pub fn set_enforce_block_upgrade_majority(&self, value: u32) {
        self.update(|p| p.enforce_block_upgrade_majority = value);
    }

    pub fn set_reject_block_outdated_majority(&self, value: u32) {
        self.update(|p| p.reject_block_outdated_majority = value);
    }

    pub fn set_to_check_block_upgrade_majority(&self, value: u32) {
        self.update(|p| p.to_check_block_upgrade_majority = value);
    }

    pub fn set_default_consistency_checks(&self, value: bool) {
        self.update(|p| p.flags.default_consistency_checks = value);
    }

    pub fn set_allow_min_difficulty_blocks(&self, value: bool) {
        self.update(|p| p.flags.allow_min_difficulty_blocks = value);
    }

    pub fn set_skip_proof_of_work_check(&self, value: bool) {
        self.update(|p| p.flags.skip_proof_of_work_check = value);
    }
}

static REGISTRY: Lazy<ParamsRegistry> = Lazy::new(ParamsRegistry::new);

/// The process-wide registry, built on first use
pub fn registry() -> &'static ParamsRegistry {
    &REGISTRY
}

/// Select the network this process runs on
pub fn select_params(network: NetworkId) {
    REGISTRY.select(network);
}

/// Parameters of the selected network
pub fn params() -> Arc<NetworkProfile> {
    REGISTRY.active()
}

/// Parameters of a specific network
pub fn params_for(network: NetworkId) -> Arc<NetworkProfile> {
    REGISTRY.lookup(network)
}

/// Unit-test setters; only valid while the unit-test network is selected
pub fn modifiable_params() -> UnitTestParams<'static> {
    REGISTRY.mutable_view()
}

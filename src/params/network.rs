//! Network identifiers
//!
//! The closed set of networks a node can run on. Anything coming from
//! outside (flags, environment, config) goes through `FromStr` or
//! [`NetworkId::from_flags`] so unknown names never reach the registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network selection errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseNetworkError {
    #[error("Unknown network: {0}")]
    Unknown(String),
    #[error("Invalid combination of --regtest and --testnet")]
    ConflictingFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Main,
    Test,
    RegTest,
    UnitTest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Test,
        NetworkId::RegTest,
        NetworkId::UnitTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::RegTest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    /// Map the classic `--testnet` / `--regtest` switches to a network
    pub fn from_flags(testnet: bool, regtest: bool) -> Result<Self, ParseNetworkError> {
        match (testnet, regtest) {
            (true, true) => Err(ParseNetworkError::ConflictingFlags),
            (true, false) => Ok(NetworkId::Test),
            (false, true) => Ok(NetworkId::RegTest),
            (false, false) => Ok(NetworkId::Main),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseNetworkError::Unknown(s.to_string()))
    }
}

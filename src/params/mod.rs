//! Chain parameters - Network profiles, genesis, checkpoints, and selection

mod base58;
mod checkpoints;
mod genesis;
mod network;
mod profile;
mod registry;

pub use base58::*;
pub use checkpoints::*;
pub use genesis::*;
pub use network::*;
pub use profile::*;
pub use registry::*;

//! Consensus module - Scripts, transactions, blocks, and proof-of-work targets

mod block;
mod pow;
mod script;
mod transaction;

pub use block::*;
pub use pow::*;
pub use script::*;
pub use transaction::*;

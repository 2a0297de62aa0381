//! P2P module - Bootstrap seed data

mod seeds;

pub use seeds::*;

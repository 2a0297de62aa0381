//! Seed Node Configuration
//!
//! Hardcoded bootstrap nodes for initial peer discovery. DNS seeds are
//! handed to the network layer untouched; fixed seeds are compiled-in
//! (address, port) entries turned into peer records on demand.

use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::ONE_WEEK;

/// A DNS seed: display label and a resolvable hostname or literal address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

impl DnsSeed {
    pub const fn new(name: &'static str, host: &'static str) -> Self {
        Self { name, host }
    }
}

/// Packed fixed-seed entry: 16-byte IPv6 (or IPv4-mapped) address and port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    /// IPv4 entry stored in its `::ffff:a.b.c.d` mapped form
    pub const fn ipv4(octets: [u8; 4], port: u16) -> Self {
        let [a, b, c, d] = octets;
        Self {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }

    /// Address with IPv4-mapped entries unwrapped to plain IPv4
    pub fn ip(&self) -> IpAddr {
        let v6 = Ipv6Addr::from(self.addr);
        match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip(), self.port)
    }
}

/// A fixed seed with a synthetic "last seen" time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub addr: SocketAddr,
    /// Unix seconds
    pub last_seen: i64,
}

/// Fixed seeds for the main network
pub static MAIN_FIXED_SEEDS: &[SeedSpec] = &[
    SeedSpec::ipv4([45, 76, 63, 253], 38349),
    SeedSpec::ipv4([140, 82, 15, 2], 38349),
    SeedSpec::ipv4([217, 163, 11, 120], 38349),
];

/// Fixed seeds for the test network
pub static TEST_FIXED_SEEDS: &[SeedSpec] = &[];

/// Random last-seen time between one and two weeks before `now`.
///
/// Nodes only talk to a couple of fixed seeds before gossip hands them
/// fresher addresses, so the seeds must not all look equally recent.
pub fn seed_last_seen<R: Rng + ?Sized>(now: i64, rng: &mut R) -> i64 {
    now - rng.gen_range(0..ONE_WEEK) - ONE_WEEK
}

/// Turn a fixed seed table into peer records as of `now`
pub fn materialize_seeds<R: Rng + ?Sized>(
    specs: &[SeedSpec],
    now: i64,
    rng: &mut R,
) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| SeedAddress {
            addr: spec.socket_addr(),
            last_seen: seed_last_seen(now, rng),
        })
        .collect()
}

/// Current Unix time in seconds
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

//! Chain parameter inspector
//!
//! Builds every network profile (verifying each genesis block), selects
//! one, and prints what a node on that network would be anchored to.

use chainparams::params::Base58Type;
use chainparams::{params, select_params, NetworkId};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chainparams-info", about = "Show the parameters of a network")]
struct Args {
    /// Network to select: main, test, regtest or unittest
    #[arg(long, env = "CHAIN_NETWORK", conflicts_with_all = ["testnet", "regtest"])]
    network: Option<NetworkId>,

    /// Shorthand for --network test
    #[arg(long)]
    testnet: bool,

    /// Shorthand for --network regtest
    #[arg(long)]
    regtest: bool,

    /// Print the full profile as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let network = match args.network {
        Some(network) => network,
        None => NetworkId::from_flags(args.testnet, args.regtest)?,
    };

    select_params(network);
    let profile = params();

    if args.json {
        println!("{}", serde_json::to_string_pretty(profile.as_ref())?);
        return Ok(());
    }

    println!("Network:        {}", profile.name);
    println!("Magic:          {}", hex::encode(profile.message_start));
    println!("Default Port:   {}", profile.default_port);
    println!();
    println!("Genesis Block:");
    println!("  Hash:         {}", profile.hash_genesis_block);
    println!("  Merkle Root:  {}", profile.genesis.header.merkle_root);
    println!("  Timestamp:    {}", profile.genesis.header.time);
    println!("  Difficulty:   0x{:08x}", profile.genesis.header.bits);
    println!("  Nonce:        {}", profile.genesis.header.nonce);
    println!();
    println!("Checkpoints:");
    for (height, hash) in profile.checkpoints.iter() {
        println!("  {:>8}  {}", height, hash);
    }
    println!();
    println!("Address Prefixes:");
    for role in Base58Type::ALL {
        println!("  {:<14}  {}", format!("{:?}", role), hex::encode(profile.base58_prefix(role)));
    }
    println!();
    println!("Seeds:");
    for seed in &profile.dns_seeds {
        println!("  dns    {} ({})", seed.host, seed.name);
    }
    for seed in profile.fixed_seed_addresses() {
        println!("  fixed  {} (last seen {})", seed.addr, seed.last_seen);
    }

    Ok(())
}

//! Checkpoint registry
//!
//! Hardcoded (height, hash) pins plus the metadata used to estimate sync
//! progress. The registry is passive data: rejecting reorganizations below
//! the last checkpoint is the caller's job.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::crypto::Hash;

/// Verifying signatures after the last checkpoint costs this much more
/// than accepting pre-checkpoint blocks.
const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("Checkpoint table is empty")]
    Empty,
    #[error("Checkpoint table must start at height 0, found {0}")]
    MissingGenesis(u32),
    #[error("Checkpoint heights must strictly increase: {prev} then {next}")]
    NotIncreasing { prev: u32, next: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointRegistry {
    checkpoints: BTreeMap<u32, Hash>,
    /// Unix timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Total transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointRegistry {
    /// Build a registry from a table listed in height order
    pub fn new(
        entries: &[(u32, Hash)],
        last_checkpoint_time: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Result<Self, CheckpointError> {
        let (first, _) = entries.first().ok_or(CheckpointError::Empty)?;
        if *first != 0 {
            return Err(CheckpointError::MissingGenesis(*first));
        }
        for pair in entries.windows(2) {
            let (prev, next) = (pair[0].0, pair[1].0);
            if next <= prev {
                return Err(CheckpointError::NotIncreasing { prev, next });
            }
        }

        Ok(Self {
            checkpoints: entries.iter().copied().collect(),
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        })
    }

    /// Pinned hash at `height`, if any
    pub fn get(&self, height: u32) -> Option<Hash> {
        self.checkpoints.get(&height).copied()
    }

    /// True unless `height` is pinned to a different hash
    pub fn check(&self, height: u32, hash: &Hash) -> bool {
        self.get(height).map_or(true, |pinned| pinned == *hash)
    }

    /// Hash pinned at height 0
    pub fn genesis_hash(&self) -> Hash {
        self.get(0).unwrap_or_default()
    }

    /// Height of the last checkpoint
    pub fn total_blocks_estimate(&self) -> u32 {
        self.checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// Closest checkpoint at or below `height`
    pub fn last_checkpoint_at_or_below(&self, height: u32) -> Option<(u32, Hash)> {
        self.checkpoints
            .range(..=height)
            .next_back()
            .map(|(h, hash)| (*h, *hash))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Hash)> + '_ {
        self.checkpoints.iter().map(|(h, hash)| (*h, *hash))
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Rough fraction of the chain verified, in `[0, 1]`.
    ///
    /// `chain_tx` is the transaction count up to the tip being judged and
    /// `block_time` its timestamp. Advisory only.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        block_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };
        let checkpoint_tx = self.transactions_last_checkpoint as f64;
        let chain_tx_f = chain_tx as f64;

        let (work_before, work_after) = if chain_tx <= self.transactions_last_checkpoint {
            let cheap_after = checkpoint_tx - chain_tx_f;
            let expensive_after = (now - self.last_checkpoint_time) as f64 / SECONDS_PER_DAY
                * self.transactions_per_day;
            (chain_tx_f, cheap_after + expensive_after * factor)
        } else {
            let expensive_before = chain_tx_f - checkpoint_tx;
            let expensive_after =
                (now - block_time) as f64 / SECONDS_PER_DAY * self.transactions_per_day;
            (
                checkpoint_tx + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }
}

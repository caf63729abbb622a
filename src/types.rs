// src/types.rs
//! Common types shared across the crate.

use serde::{Deserialize, Serialize};

/// Hex-encoded on-chain address.
pub type Address = String;

/// Immutable snapshot of one on-chain vesting grant, as delivered by the
/// external record source. Never mutated locally; a fresher view comes from
/// re-fetching.
///
/// Amount fields are decimal strings in human units; `token_decimals` scales
/// them to the token's smallest unit when a claim is submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingRecord {
    /// Grant contract address, the primary key.
    pub contract: Address,
    pub recipient: Address,
    /// May disable the grant; see `disabled_at`.
    pub admin: Address,
    /// Vested asset address; records are filtered against a configured token.
    pub token: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u32,
    pub total_locked: String,
    pub total_claimed: String,
    pub unclaimed: String,
    /// Unix seconds. Invariant: start_time <= start_time + cliff_length <= end_time.
    pub start_time: u64,
    pub end_time: u64,
    pub cliff_length: u64,
    /// Observation time of this snapshot, Unix seconds.
    pub timestamp: u64,
    /// If set and in the past, vesting accrues nothing beyond this point.
    #[serde(default)]
    pub disabled_at: Option<u64>,
}

impl VestingRecord {
    /// End of the cliff window, Unix seconds.
    pub fn cliff_end(&self) -> u64 {
        self.start_time + self.cliff_length
    }

    /// End time capped by `disabled_at` when the grant was disabled.
    pub fn effective_end_time(&self) -> u64 {
        match self.disabled_at {
            Some(disabled) => self.end_time.min(disabled),
            None => self.end_time,
        }
    }
}

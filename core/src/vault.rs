//! Vault reference data
//!
//! Vaults are immutable configuration: the engine only ever reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultTier {
    Starter,
    Growth,
    Premium,
    Elite,
}

/// How the scheduled yield is paid out over the vault term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutSchedule {
    Monthly,
    Quarterly,
    AtMaturity,
}

impl PayoutSchedule {
    /// Number of payouts over a term. Quarterly terms not divisible by three
    /// round up; the final payout covers the stub period.
    pub fn payout_count(&self, duration_months: u32) -> u32 {
        match self {
            PayoutSchedule::Monthly => duration_months,
            PayoutSchedule::Quarterly => duration_months.div_ceil(3),
            PayoutSchedule::AtMaturity => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    pub tier: VaultTier,
    pub duration_months: u32,
    /// APY before any boost is applied, as a percentage.
    pub base_apy: Decimal,
    /// APY at a fully filled boost, as a percentage.
    pub max_apy: Decimal,
    pub base_mining_rate: Decimal,
    pub max_mining_rate: Decimal,
    /// VMT locked at activation as the vault entry requirement.
    pub entry_lock: Decimal,
    pub payout_schedule: PayoutSchedule,
}

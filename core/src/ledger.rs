//! Append-only ledger rows and cycle snapshots

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One investment's minted delta for one completed cycle. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningLedgerEntry {
    pub id: Uuid,
    pub investment_id: Uuid,
    pub cycle_date: NaiveDate,
    pub minted: Decimal,
    /// Difficulty applied when this delta was minted.
    pub difficulty: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Circulating-supply breakdown: everything minted to users plus amounts
/// locked as boosts or vault entry requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyBreakdown {
    pub minted: Decimal,
    pub boost_locked: Decimal,
    pub entry_locked: Decimal,
}

impl SupplyBreakdown {
    pub fn circulating(&self) -> Decimal {
        self.minted + self.boost_locked + self.entry_locked
    }
}

/// One row per completed daily mining run. The `total_minted` of the latest
/// row always equals the sum of every per-investment delta ever recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningStat {
    pub cycle_date: NaiveDate,
    pub total_minted: Decimal,
    pub supply: SupplyBreakdown,
    pub active_miners: u64,
    pub difficulty: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Record of a settled claim. Written transactionally with the balance
/// mutations it represents; never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: Uuid,
    pub investment_id: Uuid,
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
    pub destination: String,
    pub timestamp: DateTime<Utc>,
}

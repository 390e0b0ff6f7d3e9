//! Investment aggregate

use crate::boost::BoostPosition;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentStatus {
    /// Created, principal not yet committed.
    Pending,
    /// Earning yield and mining rewards.
    Active,
    /// Listed on the secondary market; rewards keep accruing but claims are blocked.
    Listed,
    /// Term ended; pending balances remain claimable.
    Matured,
    /// Fully settled, entry lock and boosts returned.
    Closed,
}

/// One user's position in a vault. Numeric fields are mutated only by the
/// engine (activation, daily mining job, claim settlement); marketplace
/// transfers reassign the owner without touching them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    pub owner: String,
    pub vault_id: String,
    pub principal: Decimal,
    pub boosts: Vec<BoostPosition>,
    /// Effective APY fixed at activation (base plus boost fill).
    pub apy: Decimal,
    /// Effective mining rate fixed at activation.
    pub mining_rate: Decimal,
    /// VMT locked to satisfy the vault entry requirement.
    pub entry_locked: Decimal,
    pub pending_reward: Decimal,
    pub total_minted: Decimal,
    pub pending_yield: Decimal,
    pub total_earned_yield: Decimal,
    /// Cumulative net VMT received through claims.
    pub total_claimed: Decimal,
    pub status: InvestmentStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Investment {
    pub fn new(owner: impl Into<String>, vault_id: impl Into<String>, principal: Decimal) -> Self {
        Investment {
            id: Uuid::new_v4(),
            owner: owner.into(),
            vault_id: vault_id.into(),
            principal,
            boosts: Vec::new(),
            apy: Decimal::ZERO,
            mining_rate: Decimal::ZERO,
            entry_locked: Decimal::ZERO,
            pending_reward: Decimal::ZERO,
            total_minted: Decimal::ZERO,
            pending_yield: Decimal::ZERO,
            total_earned_yield: Decimal::ZERO,
            total_claimed: Decimal::ZERO,
            status: InvestmentStatus::Pending,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == InvestmentStatus::Active
    }

    /// Claims are allowed while the position is held by its owner.
    pub fn is_claimable(&self) -> bool {
        matches!(self.status, InvestmentStatus::Active | InvestmentStatus::Matured)
    }

    /// Sum of boost deposits not yet returned.
    pub fn boost_locked(&self) -> Decimal {
        self.boosts
            .iter()
            .filter(|b| !b.is_returned)
            .map(|b| b.amount)
            .sum()
    }
}

//! Treasury pool accounting with an append-only audit trail

use crate::error::{Result, TreasuryError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a treasury movement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasurySource {
    ClaimTax,
    Donation,
    Withdrawal,
}

/// One audit-trail entry. Withdrawals carry a negative amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryTransaction {
    pub source: TreasurySource,
    /// Claim id, donor, or withdrawal reference.
    pub reference: String,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreasuryPool {
    balance: Decimal,
    total_collected: Decimal,
    total_withdrawn: Decimal,
    transactions: Vec<TreasuryTransaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreasuryReport {
    pub balance: Decimal,
    pub total_collected: Decimal,
    pub total_withdrawn: Decimal,
    pub transaction_count: usize,
}

impl TreasuryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn total_collected(&self) -> Decimal {
        self.total_collected
    }

    /// Credit the tax portion of a settled claim.
    pub fn deposit_claim_tax(
        &mut self,
        claim_id: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.deposit(TreasurySource::ClaimTax, claim_id.into(), amount, timestamp)
    }

    pub fn deposit_donation(
        &mut self,
        donor: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.deposit(TreasurySource::Donation, donor.into(), amount, timestamp)
    }

    fn deposit(
        &mut self,
        source: TreasurySource,
        reference: String,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(TreasuryError::InvalidAmount(format!(
                "deposit must be positive, got {amount}"
            )));
        }
        self.balance += amount;
        self.total_collected += amount;
        self.transactions.push(TreasuryTransaction {
            source,
            reference,
            amount,
            balance_after: self.balance,
            timestamp,
        });
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        reference: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(TreasuryError::InvalidAmount(format!(
                "withdrawal must be positive, got {amount}"
            )));
        }
        if amount > self.balance {
            return Err(TreasuryError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.total_withdrawn += amount;
        self.transactions.push(TreasuryTransaction {
            source: TreasurySource::Withdrawal,
            reference: reference.into(),
            amount: -amount,
            balance_after: self.balance,
            timestamp,
        });
        Ok(())
    }

    pub fn transactions(&self) -> &[TreasuryTransaction] {
        &self.transactions
    }

    pub fn report(&self) -> TreasuryReport {
        TreasuryReport {
            balance: self.balance,
            total_collected: self.total_collected,
            total_withdrawn: self.total_withdrawn,
            transaction_count: self.transactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_claim_tax_deposit() {
        let mut pool = TreasuryPool::new();
        pool.deposit_claim_tax("claim-1", dec!(50), Utc::now()).unwrap();
        assert_eq!(pool.balance(), dec!(50));
        assert_eq!(pool.total_collected(), dec!(50));
        assert_eq!(pool.transactions().len(), 1);
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let mut pool = TreasuryPool::new();
        assert!(pool.deposit_claim_tax("claim-1", Decimal::ZERO, Utc::now()).is_err());
        assert_eq!(pool.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_insufficient_balance() {
        let mut pool = TreasuryPool::new();
        pool.deposit_claim_tax("claim-1", dec!(10), Utc::now()).unwrap();
        let err = pool.withdraw("grant-1", dec!(25), Utc::now()).unwrap_err();
        assert!(matches!(err, TreasuryError::InsufficientBalance { .. }));
        assert_eq!(pool.balance(), dec!(10));
    }
}

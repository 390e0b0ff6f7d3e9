//! Claim settlement with treasury tax
//!
//! The split is pure; the settlement is one atomic storage unit (pending
//! zeroed, owner credited, treasury credited, record written) so a partial
//! claim can never exist.

use crate::error::{EngineError, Result};
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use uuid::Uuid;
use vaultmine_core::constants::CLAIM_TAX_RATE;
use vaultmine_core::{amount, ClaimRecord, EngineStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimSplit {
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

pub struct ClaimTaxEngine;

impl ClaimTaxEngine {
    /// Split a gross claim into the treasury tax and the user's net amount.
    pub fn split(gross: Decimal, rate: Decimal) -> Result<ClaimSplit> {
        if gross <= Decimal::ZERO {
            return Err(EngineError::NoPendingBalance);
        }
        if rate < Decimal::ZERO || rate >= dec!(1) {
            return Err(EngineError::Validation(format!(
                "tax rate must be in [0, 1), got {rate}"
            )));
        }
        let tax = amount::quantize(gross * rate);
        let net = amount::quantize(gross - tax);
        Ok(ClaimSplit { gross, tax, net })
    }

    /// Settle the full pending reward of an investment.
    ///
    /// The store re-checks the pending balance inside its transaction; losing
    /// a race against a concurrent claim surfaces as `NoPendingBalance`, not
    /// as a double payout.
    pub fn claim(
        store: &dyn EngineStore,
        investment_id: &Uuid,
        destination: &str,
    ) -> Result<ClaimRecord> {
        let investment = store
            .investment(investment_id)?
            .ok_or_else(|| EngineError::InvestmentNotFound(investment_id.to_string()))?;

        if !investment.is_claimable() {
            return Err(EngineError::NotClaimable(format!(
                "investment {} has status {:?}",
                investment.id, investment.status
            )));
        }
        if investment.pending_reward <= Decimal::ZERO {
            return Err(EngineError::NoPendingBalance);
        }

        let split = Self::split(investment.pending_reward, CLAIM_TAX_RATE)?;
        let record = ClaimRecord {
            id: Uuid::new_v4(),
            investment_id: *investment_id,
            gross: split.gross,
            tax: split.tax,
            net: split.net,
            destination: destination.to_string(),
            timestamp: Utc::now(),
        };

        match store.apply_claim(&record) {
            Ok(()) => {
                info!(
                    "claim {} settled for investment {}: gross {} tax {} net {}",
                    record.id, investment_id, record.gross, record.tax, record.net
                );
                Ok(record)
            }
            Err(StoreError::Conflict(_)) => Err(EngineError::NoPendingBalance),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact() {
        let split = ClaimTaxEngine::split(dec!(1000), dec!(0.05)).unwrap();
        assert_eq!(split.tax, dec!(50));
        assert_eq!(split.net, dec!(950));
        assert_eq!(split.tax + split.net, split.gross);
    }

    #[test]
    fn test_zero_gross_rejected() {
        assert!(matches!(
            ClaimTaxEngine::split(Decimal::ZERO, dec!(0.05)),
            Err(EngineError::NoPendingBalance)
        ));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        assert!(matches!(
            ClaimTaxEngine::split(dec!(100), dec!(1)),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            ClaimTaxEngine::split(dec!(100), dec!(-0.01)),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_rate_is_taxless() {
        let split = ClaimTaxEngine::split(dec!(100), Decimal::ZERO).unwrap();
        assert_eq!(split.tax, Decimal::ZERO);
        assert_eq!(split.net, dec!(100));
    }
}

//! Scheduled yield calculation
//!
//! Pure: principal, APY, and term in, payout amounts out. Invoked at
//! activation and by the read-side estimation path.

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use vaultmine_core::amount;
use vaultmine_core::vault::PayoutSchedule;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningsBreakdown {
    /// Total stable-unit return over the full term.
    pub total_return: Decimal,
    pub payout_count: u32,
    pub per_payout: Decimal,
}

pub struct EarningsCalculator;

impl EarningsCalculator {
    pub fn calculate(
        principal: Decimal,
        apy: Decimal,
        duration_months: u32,
        schedule: PayoutSchedule,
    ) -> Result<EarningsBreakdown> {
        if principal <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "principal must be positive, got {principal}"
            )));
        }
        if duration_months == 0 {
            return Err(EngineError::Validation("duration must be positive".into()));
        }
        if apy < Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "APY cannot be negative, got {apy}"
            )));
        }

        let total_return = amount::quantize(
            principal * amount::pct(apy) * Decimal::from(duration_months) / dec!(12),
        );
        let payout_count = schedule.payout_count(duration_months);
        let per_payout = amount::quantize(total_return / Decimal::from(payout_count));

        Ok(EarningsBreakdown {
            total_return,
            payout_count,
            per_payout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_payouts() {
        let breakdown =
            EarningsCalculator::calculate(dec!(12000), dec!(10), 12, PayoutSchedule::Monthly)
                .unwrap();
        assert_eq!(breakdown.total_return, dec!(1200));
        assert_eq!(breakdown.payout_count, 12);
        assert_eq!(breakdown.per_payout, dec!(100));
    }

    #[test]
    fn test_quarterly_payouts() {
        let breakdown =
            EarningsCalculator::calculate(dec!(10000), dec!(12), 6, PayoutSchedule::Quarterly)
                .unwrap();
        assert_eq!(breakdown.total_return, dec!(600));
        assert_eq!(breakdown.payout_count, 2);
        assert_eq!(breakdown.per_payout, dec!(300));
    }

    #[test]
    fn test_lump_sum_at_maturity() {
        let breakdown =
            EarningsCalculator::calculate(dec!(5000), dec!(8), 24, PayoutSchedule::AtMaturity)
                .unwrap();
        assert_eq!(breakdown.total_return, dec!(800));
        assert_eq!(breakdown.payout_count, 1);
        assert_eq!(breakdown.per_payout, breakdown.total_return);
    }

    #[test]
    fn test_zero_apy_yields_zero_payouts() {
        let breakdown =
            EarningsCalculator::calculate(dec!(5000), Decimal::ZERO, 12, PayoutSchedule::Monthly)
                .unwrap();
        assert_eq!(breakdown.total_return, Decimal::ZERO);
        assert_eq!(breakdown.per_payout, Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert!(matches!(
            EarningsCalculator::calculate(Decimal::ZERO, dec!(10), 12, PayoutSchedule::Monthly),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            EarningsCalculator::calculate(dec!(1000), dec!(10), 0, PayoutSchedule::Monthly),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            EarningsCalculator::calculate(dec!(1000), dec!(-1), 12, PayoutSchedule::Monthly),
            Err(EngineError::Validation(_))
        ));
    }
}

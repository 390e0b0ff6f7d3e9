//! Boost valuation and APY/mining-rate amplification
//!
//! A boost deposit fills a cap worth half the principal; the fill fraction
//! interpolates linearly between the vault's base and max rates.

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use vaultmine_core::amount;
use vaultmine_core::constants::BOOST_CAP_FRACTION;
use vaultmine_core::BoostToken;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostOutcome {
    pub market_value: Decimal,
    /// Market value after the token's valuation policy is applied.
    pub effective_value: Decimal,
    /// Fill fraction of the boost cap, in [0, 1].
    pub boost_fraction: Decimal,
    pub final_apy: Decimal,
    pub final_mining_rate: Decimal,
}

pub struct BoostCalculator;

impl BoostCalculator {
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        principal: Decimal,
        base_apy: Decimal,
        max_apy: Decimal,
        base_mining_rate: Decimal,
        max_mining_rate: Decimal,
        token: BoostToken,
        deposit_amount: Decimal,
        price: Decimal,
    ) -> Result<BoostOutcome> {
        if principal <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "principal must be positive, got {principal}"
            )));
        }

        // A dead price feed or an empty deposit degrades to the base rates,
        // never to a division error.
        let market_value = if deposit_amount <= Decimal::ZERO || price <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            deposit_amount * price
        };
        let effective_value = token.effective_value(market_value);
        let max_boost_value = principal * BOOST_CAP_FRACTION;
        let boost_fraction = if effective_value <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            (effective_value / max_boost_value).min(dec!(1))
        };

        let final_apy = amount::quantize(base_apy + boost_fraction * (max_apy - base_apy));
        let final_mining_rate = amount::quantize(
            base_mining_rate + boost_fraction * (max_mining_rate - base_mining_rate),
        );

        Ok(BoostOutcome {
            market_value,
            effective_value,
            boost_fraction,
            final_apy,
            final_mining_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(token: BoostToken, deposit: Decimal, price: Decimal) -> BoostOutcome {
        BoostCalculator::calculate(
            dec!(10000),
            dec!(8),
            dec!(12),
            dec!(55),
            dec!(80),
            token,
            deposit,
            price,
        )
        .unwrap()
    }

    #[test]
    fn test_fraction_capped_at_one() {
        // Effective value far above the 5000 cap.
        let outcome = calc(BoostToken::Native, dec!(1_000_000), dec!(1));
        assert_eq!(outcome.boost_fraction, dec!(1));
        assert_eq!(outcome.final_apy, dec!(12));
        assert_eq!(outcome.final_mining_rate, dec!(80));
    }

    #[test]
    fn test_partial_fill_interpolates() {
        // 2000 * 1 * 1.25 = 2500 effective = half of the 5000 cap.
        let outcome = calc(BoostToken::Native, dec!(2000), dec!(1));
        assert_eq!(outcome.boost_fraction, dec!(0.5));
        assert_eq!(outcome.final_apy, dec!(10));
        assert_eq!(outcome.final_mining_rate, dec!(67.5));
    }

    #[test]
    fn test_partner_discount_applies() {
        let outcome = calc(BoostToken::Partner, dec!(1000), dec!(1));
        assert_eq!(outcome.effective_value, dec!(900));
        assert_eq!(outcome.boost_fraction, dec!(0.18));
    }

    #[test]
    fn test_zero_price_degrades_to_base_rates() {
        let outcome = calc(BoostToken::Native, dec!(1000), Decimal::ZERO);
        assert_eq!(outcome.boost_fraction, Decimal::ZERO);
        assert_eq!(outcome.final_apy, dec!(8));
        assert_eq!(outcome.final_mining_rate, dec!(55));
    }

    #[test]
    fn test_non_positive_deposit_degrades_to_base_rates() {
        let outcome = calc(BoostToken::Partner, dec!(-50), dec!(1));
        assert_eq!(outcome.boost_fraction, Decimal::ZERO);
        assert_eq!(outcome.final_apy, dec!(8));
    }

    #[test]
    fn test_non_positive_principal_rejected() {
        assert!(matches!(
            BoostCalculator::calculate(
                Decimal::ZERO,
                dec!(8),
                dec!(12),
                dec!(55),
                dec!(80),
                BoostToken::Native,
                dec!(100),
                dec!(1),
            ),
            Err(EngineError::Validation(_))
        ));
    }
}

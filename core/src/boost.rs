//! Boost token kinds and positions
//!
//! The valuation policy lives on the token variant itself so the two-sided
//! pricing rule (premium for native deposits, discount for partner deposits)
//! stays in one auditable place.

use crate::constants::{NATIVE_BOOST_MULTIPLIER, PARTNER_BOOST_DISCOUNT};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of tokens accepted as boost deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostToken {
    /// The platform reward token, counted at a premium over market value.
    Native,
    /// Partner token, counted at a discount of market value.
    Partner,
}

impl BoostToken {
    /// Value counted toward the boost cap for a given market value.
    /// Non-positive market values (including a dead price feed) count as zero.
    pub fn effective_value(&self, market_value: Decimal) -> Decimal {
        if market_value <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match self {
            BoostToken::Native => market_value * NATIVE_BOOST_MULTIPLIER,
            BoostToken::Partner => market_value * (dec!(1) - PARTNER_BOOST_DISCOUNT),
        }
    }
}

/// A boost deposit attached to an investment. Created at activation and
/// mutated only to mark the deposit returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostPosition {
    pub id: Uuid,
    pub token: BoostToken,
    pub amount: Decimal,
    /// Market value captured at deposit time.
    pub market_value: Decimal,
    pub is_returned: bool,
    pub deposited_at: DateTime<Utc>,
}

impl BoostPosition {
    pub fn new(token: BoostToken, amount: Decimal, market_value: Decimal) -> Self {
        BoostPosition {
            id: Uuid::new_v4(),
            token,
            amount,
            market_value,
            is_returned: false,
            deposited_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_premium() {
        assert_eq!(BoostToken::Native.effective_value(dec!(100)), dec!(125));
    }

    #[test]
    fn test_partner_discount() {
        assert_eq!(BoostToken::Partner.effective_value(dec!(100)), dec!(90));
    }

    #[test]
    fn test_non_positive_market_value_counts_as_zero() {
        assert_eq!(BoostToken::Native.effective_value(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(BoostToken::Partner.effective_value(dec!(-5)), Decimal::ZERO);
    }
}

//! Reward-token minting projections

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use vaultmine_core::amount;
use vaultmine_core::constants::{BASE_DAILY_RATE_PER_UNIT, DAYS_PER_MONTH};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningProjection {
    /// VMT minted per cycle after difficulty.
    pub daily: Decimal,
    pub monthly: Decimal,
    pub total: Decimal,
    /// Difficulty this projection was computed at.
    pub difficulty: Decimal,
}

pub struct MiningCalculator;

impl MiningCalculator {
    /// `daily = (rate/100) * (amount/1000) * base_rate / difficulty`
    ///
    /// Strictly decreasing in difficulty for a fixed raw rate. Difficulty must
    /// be positive; `DifficultyEngine` guarantees its output is.
    pub fn calculate(
        mining_rate: Decimal,
        invested_amount: Decimal,
        difficulty: Decimal,
        duration_months: u32,
    ) -> Result<MiningProjection> {
        if invested_amount <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "invested amount must be positive, got {invested_amount}"
            )));
        }
        if mining_rate < Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "mining rate cannot be negative, got {mining_rate}"
            )));
        }
        if difficulty <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "difficulty must be positive, got {difficulty}"
            )));
        }
        if duration_months == 0 {
            return Err(EngineError::Validation("duration must be positive".into()));
        }

        let daily_raw =
            amount::pct(mining_rate) * (invested_amount / dec!(1000)) * BASE_DAILY_RATE_PER_UNIT;
        let daily = amount::quantize(daily_raw / difficulty);
        let monthly = amount::quantize(daily * DAYS_PER_MONTH);
        let total = amount::quantize(daily * DAYS_PER_MONTH * Decimal::from(duration_months));

        Ok(MiningProjection {
            daily,
            monthly,
            total,
            difficulty,
        })
    }
}

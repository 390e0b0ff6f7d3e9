//! Supply/participation-sensitive mining difficulty
//!
//! Difficulty is never module state: it is computed fresh from explicit
//! factors each run and passed down, so invocations stay reentrant and
//! independently testable.

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use vaultmine_core::constants::{BASE_DIFFICULTY, MINER_FACTOR, SUPPLY_FACTOR, TOTAL_SUPPLY_CAP};

/// Tunable inputs of the difficulty formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyFactors {
    pub base_difficulty: Decimal,
    pub total_supply_cap: Decimal,
    pub supply_factor: Decimal,
    pub miner_factor: Decimal,
}

impl Default for DifficultyFactors {
    fn default() -> Self {
        DifficultyFactors {
            base_difficulty: BASE_DIFFICULTY,
            total_supply_cap: TOTAL_SUPPLY_CAP,
            supply_factor: SUPPLY_FACTOR,
            miner_factor: MINER_FACTOR,
        }
    }
}

pub struct DifficultyEngine;

impl DifficultyEngine {
    /// `difficulty = base * (1 + supply_ratio * supply_factor)
    ///                    * (1 + active_miners * miner_factor)`
    ///
    /// The supply ratio is clamped to 1 so difficulty cannot exceed the
    /// designed ceiling even if bookkeeping temporarily overshoots the cap.
    /// The result is always >= `base_difficulty`.
    pub fn compute(
        factors: &DifficultyFactors,
        circulating_supply: Decimal,
        active_miners: u64,
    ) -> Result<Decimal> {
        if circulating_supply < Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "circulating supply cannot be negative, got {circulating_supply}"
            )));
        }
        if factors.total_supply_cap <= Decimal::ZERO {
            return Err(EngineError::Validation("supply cap must be positive".into()));
        }
        if factors.base_difficulty <= Decimal::ZERO {
            return Err(EngineError::Validation("base difficulty must be positive".into()));
        }
        if factors.supply_factor < Decimal::ZERO || factors.miner_factor < Decimal::ZERO {
            return Err(EngineError::Validation("difficulty factors cannot be negative".into()));
        }

        let supply_ratio = (circulating_supply / factors.total_supply_cap).min(dec!(1));
        let supply_multiplier = dec!(1) + supply_ratio * factors.supply_factor;
        let miner_multiplier = dec!(1) + Decimal::from(active_miners) * factors.miner_factor;

        Ok(factors.base_difficulty * supply_multiplier * miner_multiplier)
    }
}

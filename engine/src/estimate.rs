//! Read-side investment estimation
//!
//! Side-effect-free composition of the calculators at the currently stored
//! difficulty; consumed by the HTTP layer for "what would I earn" queries.

use crate::boost::{BoostCalculator, BoostOutcome};
use crate::earnings::{EarningsBreakdown, EarningsCalculator};
use crate::error::{EngineError, Result};
use crate::mining::{MiningCalculator, MiningProjection};
use crate::oracle::{price_or_fallback, PriceOracle};
use rust_decimal::Decimal;
use serde::Serialize;
use vaultmine_core::constants::BASE_DIFFICULTY;
use vaultmine_core::{BoostToken, EngineStore, Vault};

#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub vault_id: String,
    pub principal: Decimal,
    pub boost: Option<(BoostToken, Decimal)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentEstimate {
    pub vault_id: String,
    pub final_apy: Decimal,
    pub mining_rate: Decimal,
    pub boost_fraction: Decimal,
    pub difficulty: Decimal,
    pub earnings: EarningsBreakdown,
    pub mining: MiningProjection,
}

pub struct Estimator;

impl Estimator {
    pub async fn estimate<O: PriceOracle>(
        store: &dyn EngineStore,
        oracle: &O,
        request: &EstimateRequest,
    ) -> Result<InvestmentEstimate> {
        let vault = store
            .vault(&request.vault_id)?
            .ok_or_else(|| EngineError::VaultNotFound(request.vault_id.clone()))?;

        let boost = Self::boost_outcome(oracle, &vault, request).await?;

        // Most recent snapshot's difficulty; base difficulty before the first run.
        let difficulty = store
            .latest_mining_stat()?
            .map(|stat| stat.difficulty)
            .unwrap_or(BASE_DIFFICULTY);

        let earnings = EarningsCalculator::calculate(
            request.principal,
            boost.final_apy,
            vault.duration_months,
            vault.payout_schedule,
        )?;
        let mining = MiningCalculator::calculate(
            boost.final_mining_rate,
            request.principal,
            difficulty,
            vault.duration_months,
        )?;

        Ok(InvestmentEstimate {
            vault_id: vault.id,
            final_apy: boost.final_apy,
            mining_rate: boost.final_mining_rate,
            boost_fraction: boost.boost_fraction,
            difficulty,
            earnings,
            mining,
        })
    }

    pub(crate) async fn boost_outcome<O: PriceOracle>(
        oracle: &O,
        vault: &Vault,
        request: &EstimateRequest,
    ) -> Result<BoostOutcome> {
        let (token, deposit, price) = match request.boost {
            Some((token, deposit)) => {
                let price = price_or_fallback(oracle, token).await;
                (token, deposit, price)
            }
            // No deposit collapses the calculator to the vault's base rates.
            None => (BoostToken::Native, Decimal::ZERO, Decimal::ZERO),
        };
        BoostCalculator::calculate(
            request.principal,
            vault.base_apy,
            vault.max_apy,
            vault.base_mining_rate,
            vault.max_mining_rate,
            token,
            deposit,
            price,
        )
    }
}

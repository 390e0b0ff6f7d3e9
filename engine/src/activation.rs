//! Investment activation
//!
//! Fixes the effective APY and mining rate from the calculators at the moment
//! the principal is committed, locks the vault entry requirement, and persists
//! the activated position.

use crate::earnings::EarningsCalculator;
use crate::error::{EngineError, Result};
use crate::estimate::{EstimateRequest, Estimator};
use crate::oracle::PriceOracle;
use chrono::{Months, Utc};
use log::info;
use rust_decimal::Decimal;
use vaultmine_core::{BoostPosition, BoostToken, EngineStore, Investment, InvestmentStatus};

#[derive(Debug, Clone)]
pub struct ActivationRequest {
    pub owner: String,
    pub vault_id: String,
    pub principal: Decimal,
    pub boost: Option<(BoostToken, Decimal)>,
}

pub struct Activator;

impl Activator {
    pub async fn activate<O: PriceOracle>(
        store: &dyn EngineStore,
        oracle: &O,
        request: ActivationRequest,
    ) -> Result<Investment> {
        if request.principal <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "principal must be positive, got {}",
                request.principal
            )));
        }
        let vault = store
            .vault(&request.vault_id)?
            .ok_or_else(|| EngineError::VaultNotFound(request.vault_id.clone()))?;

        let boost = Estimator::boost_outcome(
            oracle,
            &vault,
            &EstimateRequest {
                vault_id: request.vault_id.clone(),
                principal: request.principal,
                boost: request.boost,
            },
        )
        .await?;

        // Validates the term configuration up front; the payout amounts are
        // served later by the read side.
        EarningsCalculator::calculate(
            request.principal,
            boost.final_apy,
            vault.duration_months,
            vault.payout_schedule,
        )?;

        let now = Utc::now();
        let end = now
            .checked_add_months(Months::new(vault.duration_months))
            .ok_or_else(|| EngineError::Validation("vault duration overflows".into()))?;

        let mut investment =
            Investment::new(request.owner, request.vault_id, request.principal);
        if let Some((token, deposit)) = request.boost {
            if deposit > Decimal::ZERO {
                investment
                    .boosts
                    .push(BoostPosition::new(token, deposit, boost.market_value));
            }
        }
        investment.apy = boost.final_apy;
        investment.mining_rate = boost.final_mining_rate;
        investment.entry_locked = vault.entry_lock;
        investment.status = InvestmentStatus::Active;
        investment.start_date = Some(now);
        investment.end_date = Some(end);

        store.put_investment(&investment)?;
        info!(
            "activated investment {} in vault {} (apy {}, mining rate {})",
            investment.id, investment.vault_id, investment.apy, investment.mining_rate
        );
        Ok(investment)
    }
}

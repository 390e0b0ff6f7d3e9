//! Circulating-supply aggregation
//!
//! Rebuilt from persisted investment state on every use rather than cached,
//! so the daily job's post-run snapshot always reflects what was actually
//! written.

use crate::error::Result;
use vaultmine_core::{amount, EngineStore, InvestmentStatus, SupplyBreakdown};

pub struct SupplyAggregator;

impl SupplyAggregator {
    /// Breakdown of circulating supply: everything minted to date across all
    /// investments, boost deposits not yet returned, and entry locks of
    /// positions still held (active or listed).
    pub fn aggregate(store: &dyn EngineStore) -> Result<SupplyBreakdown> {
        let mut breakdown = SupplyBreakdown::default();
        for investment in store.investments()? {
            breakdown.minted += investment.total_minted;
            breakdown.boost_locked += investment.boost_locked();
            if matches!(
                investment.status,
                InvestmentStatus::Active | InvestmentStatus::Listed
            ) {
                breakdown.entry_locked += investment.entry_locked;
            }
        }
        breakdown.minted = amount::quantize(breakdown.minted);
        breakdown.boost_locked = amount::quantize(breakdown.boost_locked);
        breakdown.entry_locked = amount::quantize(breakdown.entry_locked);
        Ok(breakdown)
    }
}

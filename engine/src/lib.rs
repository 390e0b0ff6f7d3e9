//! VaultMine Yield & Mining Rewards Engine
//!
//! Pure calculators for scheduled yield, boost amplification, mining
//! difficulty, and reward minting, plus the once-per-cycle batch job that
//! applies them to every active investment and feeds its own output back into
//! the next cycle's inputs.

pub mod activation;
pub mod boost;
pub mod claim;
pub mod difficulty;
pub mod earnings;
pub mod error;
pub mod estimate;
pub mod job;
pub mod mining;
pub mod oracle;
pub mod supply;

pub use activation::{ActivationRequest, Activator};
pub use boost::{BoostCalculator, BoostOutcome};
pub use claim::{ClaimSplit, ClaimTaxEngine};
pub use difficulty::{DifficultyEngine, DifficultyFactors};
pub use earnings::{EarningsBreakdown, EarningsCalculator};
pub use error::{EngineError, Result};
pub use estimate::{EstimateRequest, Estimator, InvestmentEstimate};
pub use job::{DailyMiningJob, JobConfig, MintFailure, MintOutcome, RunState, RunSummary};
pub use mining::{MiningCalculator, MiningProjection};
pub use oracle::{fallback_price, price_or_fallback, HttpPriceOracle, OracleError, PriceOracle};
pub use supply::SupplyAggregator;

//! VaultMine core domain types
//!
//! Shared building blocks for the yield & mining rewards engine:
//! - the platform-wide decimal precision policy
//! - vault reference data and the investment aggregate
//! - boost token kinds with their valuation policies
//! - append-only ledger rows (mining entries, cycle stats, claim records)
//! - the `EngineStore` persistence seam

pub mod amount;
pub mod boost;
pub mod constants;
pub mod error;
pub mod investment;
pub mod ledger;
pub mod store;
pub mod vault;

pub use boost::{BoostPosition, BoostToken};
pub use error::{Result, StoreError};
pub use investment::{Investment, InvestmentStatus};
pub use ledger::{ClaimRecord, MiningLedgerEntry, MiningStat, SupplyBreakdown};
pub use store::EngineStore;
pub use vault::{PayoutSchedule, Vault, VaultTier};

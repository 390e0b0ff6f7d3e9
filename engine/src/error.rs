//! Engine error types

use chrono::NaiveDate;
use thiserror::Error;
use vaultmine_core::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Mining run already recorded for cycle {0}")]
    RunGuardConflict(NaiveDate),

    #[error("No pending balance to claim")]
    NoPendingBalance,

    #[error("Investment not claimable: {0}")]
    NotClaimable(String),

    #[error("Vault not found: {0}")]
    VaultNotFound(String),

    #[error("Investment not found: {0}")]
    InvestmentNotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

//! Treasury error types

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreasuryError {
    #[error("Insufficient treasury balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Decimal, available: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

pub type Result<T> = std::result::Result<T, TreasuryError>;

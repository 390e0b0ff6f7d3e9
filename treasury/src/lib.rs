//! VaultMine Treasury Module
//!
//! Accumulates the tax withheld from reward claims. The pool is persisted by
//! the storage layer and mutated only inside the claim settlement transaction,
//! so its balance can never drift from the claim records it mirrors.

pub mod error;
pub mod pool;

pub use error::{Result, TreasuryError};
pub use pool::{TreasuryPool, TreasuryReport, TreasurySource, TreasuryTransaction};

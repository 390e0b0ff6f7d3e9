//! Persistence seam used by the rewards engine
//!
//! The sled implementation lives in `vaultmine-storage`; engine tests provide
//! in-memory doubles (including ones that inject per-investment failures).

use crate::error::Result;
use crate::investment::Investment;
use crate::ledger::{ClaimRecord, MiningLedgerEntry, MiningStat};
use crate::vault::Vault;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

pub trait EngineStore: Send + Sync {
    fn put_vault(&self, vault: &Vault) -> Result<()>;
    fn vault(&self, id: &str) -> Result<Option<Vault>>;
    fn vaults(&self) -> Result<Vec<Vault>>;

    fn put_investment(&self, investment: &Investment) -> Result<()>;
    fn investment(&self, id: &Uuid) -> Result<Option<Investment>>;
    fn investments(&self) -> Result<Vec<Investment>>;
    /// Active investments joined with their vault configuration.
    fn active_investments(&self) -> Result<Vec<(Investment, Vault)>>;

    fn latest_mining_stat(&self) -> Result<Option<MiningStat>>;
    fn append_mining_stat(&self, stat: &MiningStat) -> Result<()>;

    /// Atomically claim the single-run marker for a cycle. Returns `false`
    /// when the marker is already held. Markers for completed cycles are never
    /// released; that is what makes the job idempotent per cycle.
    fn claim_run_guard(&self, cycle_date: NaiveDate) -> Result<bool>;

    /// Credit one investment's mining delta and append its ledger row as a
    /// single atomic unit. One investment's failure must not affect others.
    fn apply_mint(&self, entry: &MiningLedgerEntry) -> Result<()>;
    fn ledger_entries(&self) -> Result<Vec<MiningLedgerEntry>>;

    /// Settle a claim all-or-nothing: zero the pending reward, credit the net
    /// amount to the owner's cumulative total, credit the tax to the treasury,
    /// and append the record. Fails with `StoreError::Conflict` when the
    /// pending balance no longer matches `record.gross` (a concurrent claim
    /// won the race).
    fn apply_claim(&self, record: &ClaimRecord) -> Result<()>;
    fn claims(&self, investment_id: &Uuid) -> Result<Vec<ClaimRecord>>;

    fn treasury_balance(&self) -> Result<Decimal>;
}

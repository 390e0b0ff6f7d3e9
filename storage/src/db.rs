//! Sled trees and transactional writes
//!
//! Values are bincode-encoded. Writes that back user-visible balances are
//! flushed to disk before returning. The two multi-record mutations (mint
//! credit + ledger row, claim settlement) run as sled multi-tree transactions
//! so they apply all-or-nothing.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, Transactional, Tree};
use std::path::Path;
use uuid::Uuid;
use vaultmine_core::{
    ClaimRecord, EngineStore, Investment, MiningLedgerEntry, MiningStat, Result, StoreError, Vault,
};
use vaultmine_treasury::TreasuryPool;

const TREASURY_KEY: &[u8] = b"treasury";

pub struct SledStore {
    db: Db,
    vaults: Tree,
    investments: Tree,
    ledger: Tree,
    stats: Tree,
    claims: Tree,
    meta: Tree,
}

impl SledStore {
    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).map_err(io_err)?;
        Ok(SledStore {
            vaults: db.open_tree("vaults").map_err(io_err)?,
            investments: db.open_tree("investments").map_err(io_err)?,
            ledger: db.open_tree("ledger").map_err(io_err)?,
            stats: db.open_tree("stats").map_err(io_err)?,
            claims: db.open_tree("claims").map_err(io_err)?,
            meta: db.open_tree("meta").map_err(io_err)?,
            db,
        })
    }

    /// Current treasury pool with its audit trail.
    pub fn treasury_pool(&self) -> Result<TreasuryPool> {
        match self.meta.get(TREASURY_KEY).map_err(io_err)? {
            Some(bytes) => decode(&bytes),
            None => Ok(TreasuryPool::new()),
        }
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(io_err)?;
        Ok(())
    }
}

fn io_err(e: sled::Error) -> StoreError {
    StoreError::Io(e.to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn run_guard_key(cycle_date: NaiveDate) -> String {
    format!("run_guard:{cycle_date}")
}

/// Ledger keys sort by cycle date, then investment, so range scans stay cheap.
fn ledger_key(entry: &MiningLedgerEntry) -> String {
    format!("{}:{}", entry.cycle_date, entry.investment_id)
}

type TxResult<T> = std::result::Result<T, ConflictableTransactionError<StoreError>>;

fn tx_encode<T: Serialize>(value: &T) -> TxResult<Vec<u8>> {
    encode(value).map_err(ConflictableTransactionError::Abort)
}

fn tx_decode<T: DeserializeOwned>(bytes: &[u8]) -> TxResult<T> {
    decode(bytes).map_err(ConflictableTransactionError::Abort)
}

fn unwrap_tx<T>(result: std::result::Result<T, TransactionError<StoreError>>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(TransactionError::Abort(e)) => Err(e),
        Err(TransactionError::Storage(e)) => Err(io_err(e)),
    }
}

impl EngineStore for SledStore {
    fn put_vault(&self, vault: &Vault) -> Result<()> {
        self.vaults
            .insert(vault.id.as_bytes(), encode(vault)?)
            .map_err(io_err)?;
        self.flush()
    }

    fn vault(&self, id: &str) -> Result<Option<Vault>> {
        match self.vaults.get(id.as_bytes()).map_err(io_err)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn vaults(&self) -> Result<Vec<Vault>> {
        let mut vaults = Vec::new();
        for item in self.vaults.iter() {
            let (_, bytes) = item.map_err(io_err)?;
            vaults.push(decode(&bytes)?);
        }
        Ok(vaults)
    }

    fn put_investment(&self, investment: &Investment) -> Result<()> {
        self.investments
            .insert(investment.id.as_bytes(), encode(investment)?)
            .map_err(io_err)?;
        self.flush()
    }

    fn investment(&self, id: &Uuid) -> Result<Option<Investment>> {
        match self.investments.get(id.as_bytes()).map_err(io_err)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn investments(&self) -> Result<Vec<Investment>> {
        let mut investments = Vec::new();
        for item in self.investments.iter() {
            let (_, bytes) = item.map_err(io_err)?;
            investments.push(decode(&bytes)?);
        }
        Ok(investments)
    }

    fn active_investments(&self) -> Result<Vec<(Investment, Vault)>> {
        let mut joined = Vec::new();
        for investment in self.investments()? {
            if !investment.is_active() {
                continue;
            }
            let vault = self.vault(&investment.vault_id)?.ok_or_else(|| {
                StoreError::NotFound(format!(
                    "vault {} for investment {}",
                    investment.vault_id, investment.id
                ))
            })?;
            joined.push((investment, vault));
        }
        Ok(joined)
    }

    fn latest_mining_stat(&self) -> Result<Option<MiningStat>> {
        match self.stats.last().map_err(io_err)? {
            Some((_, bytes)) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn append_mining_stat(&self, stat: &MiningStat) -> Result<()> {
        self.stats
            .insert(stat.cycle_date.to_string().as_bytes(), encode(stat)?)
            .map_err(io_err)?;
        self.flush()
    }

    fn claim_run_guard(&self, cycle_date: NaiveDate) -> Result<bool> {
        let key = run_guard_key(cycle_date);
        let claimed = self
            .meta
            .compare_and_swap(
                key.as_bytes(),
                None as Option<&[u8]>,
                Some(b"held" as &[u8]),
            )
            .map_err(io_err)?
            .is_ok();
        if claimed {
            self.flush()?;
            debug!("run guard claimed for {cycle_date}");
        }
        Ok(claimed)
    }

    fn apply_mint(&self, entry: &MiningLedgerEntry) -> Result<()> {
        let result = (&self.investments, &self.ledger).transaction(|(investments, ledger)| {
            let bytes = investments
                .get(entry.investment_id.as_bytes())?
                .ok_or_else(|| {
                    ConflictableTransactionError::Abort(StoreError::NotFound(
                        entry.investment_id.to_string(),
                    ))
                })?;
            let mut investment: Investment = tx_decode(&bytes)?;
            investment.pending_reward += entry.minted;
            investment.total_minted += entry.minted;
            investments.insert(entry.investment_id.as_bytes(), tx_encode(&investment)?)?;
            ledger.insert(ledger_key(entry).as_bytes(), tx_encode(entry)?)?;
            Ok(())
        });
        unwrap_tx(result)?;
        self.flush()
    }

    fn ledger_entries(&self) -> Result<Vec<MiningLedgerEntry>> {
        let mut entries = Vec::new();
        for item in self.ledger.iter() {
            let (_, bytes) = item.map_err(io_err)?;
            entries.push(decode(&bytes)?);
        }
        Ok(entries)
    }

    fn apply_claim(&self, record: &ClaimRecord) -> Result<()> {
        let result = (&self.investments, &self.claims, &self.meta).transaction(
            |(investments, claims, meta)| {
                let bytes = investments
                    .get(record.investment_id.as_bytes())?
                    .ok_or_else(|| {
                        ConflictableTransactionError::Abort(StoreError::NotFound(
                            record.investment_id.to_string(),
                        ))
                    })?;
                let mut investment: Investment = tx_decode(&bytes)?;

                // Row-lock property: the balance must still match what the
                // claim was computed from.
                if record.gross <= Decimal::ZERO || investment.pending_reward != record.gross {
                    return Err(ConflictableTransactionError::Abort(StoreError::Conflict(
                        format!(
                            "pending balance {} no longer matches claim gross {}",
                            investment.pending_reward, record.gross
                        ),
                    )));
                }

                investment.pending_reward = Decimal::ZERO;
                investment.total_claimed += record.net;
                investments.insert(record.investment_id.as_bytes(), tx_encode(&investment)?)?;

                let mut pool: TreasuryPool = match meta.get(TREASURY_KEY)? {
                    Some(bytes) => tx_decode(&bytes)?,
                    None => TreasuryPool::new(),
                };
                if record.tax > Decimal::ZERO {
                    pool.deposit_claim_tax(record.id.to_string(), record.tax, record.timestamp)
                        .map_err(|e| {
                            ConflictableTransactionError::Abort(StoreError::Conflict(
                                e.to_string(),
                            ))
                        })?;
                }
                meta.insert(TREASURY_KEY, tx_encode(&pool)?)?;

                claims.insert(record.id.as_bytes(), tx_encode(record)?)?;
                Ok(())
            },
        );
        unwrap_tx(result)?;
        self.flush()
    }

    fn claims(&self, investment_id: &Uuid) -> Result<Vec<ClaimRecord>> {
        let mut records: Vec<ClaimRecord> = Vec::new();
        for item in self.claims.iter() {
            let (_, bytes) = item.map_err(io_err)?;
            let record: ClaimRecord = decode(&bytes)?;
            if &record.investment_id == investment_id {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn treasury_balance(&self) -> Result<Decimal> {
        Ok(self.treasury_pool()?.balance())
    }
}

//! Daily mining batch job
//!
//! Runs once per cycle under an exclusive per-date guard. Per-investment
//! mints run with bounded parallelism, each as its own storage transaction,
//! so one bad record is logged and excluded without aborting the run. The
//! closing snapshot waits on every attempt before it is written.

use crate::difficulty::{DifficultyEngine, DifficultyFactors};
use crate::error::{EngineError, Result};
use crate::mining::MiningCalculator;
use crate::supply::SupplyAggregator;
use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;
use vaultmine_core::{
    amount, EngineStore, Investment, MiningLedgerEntry, MiningStat, Vault,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Bound on concurrent per-investment mint attempts.
    pub concurrency: usize,
    /// Soft deadline: stop submitting new work once exceeded; already
    /// submitted attempts still complete and the snapshot is still written.
    pub deadline: Option<Duration>,
    pub factors: DifficultyFactors,
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            concurrency: 8,
            deadline: None,
            factors: DifficultyFactors::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    pub investment_id: Uuid,
    pub minted: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MintFailure {
    pub investment_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub cycle_date: NaiveDate,
    pub state: RunState,
    pub difficulty: Decimal,
    pub active_miners: u64,
    /// Total minted across successful attempts this run.
    pub minted: Decimal,
    pub succeeded: Vec<MintOutcome>,
    pub failed: Vec<MintFailure>,
    /// Investments skipped because the deadline was reached.
    pub skipped: Vec<Uuid>,
}

pub struct DailyMiningJob<S: EngineStore + 'static> {
    store: Arc<S>,
    config: JobConfig,
    state: RunState,
}

impl<S: EngineStore + 'static> DailyMiningJob<S> {
    pub fn new(store: Arc<S>, config: JobConfig) -> Self {
        DailyMiningJob {
            store,
            config,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run one mining cycle. Idempotent per date: a second invocation for the
    /// same cycle fails the guard and aborts before any mutation.
    pub async fn run(&mut self, cycle_date: NaiveDate) -> Result<RunSummary> {
        if !self.store.claim_run_guard(cycle_date)? {
            self.state = RunState::Aborted;
            error!("mining run for {cycle_date} rejected: run guard already held");
            return Err(EngineError::RunGuardConflict(cycle_date));
        }
        self.state = RunState::Running;

        // Missing history is a valid all-zero baseline, not an error.
        let previous_minted = self
            .store
            .latest_mining_stat()?
            .map(|stat| stat.total_minted)
            .unwrap_or_default();

        let investments = self.store.active_investments()?;
        if investments.is_empty() {
            info!("mining run {cycle_date}: no active investments, nothing to do");
            self.state = RunState::Completed;
            return Ok(RunSummary {
                cycle_date,
                state: self.state,
                difficulty: self.config.factors.base_difficulty,
                active_miners: 0,
                minted: Decimal::ZERO,
                succeeded: Vec::new(),
                failed: Vec::new(),
                skipped: Vec::new(),
            });
        }

        let supply = SupplyAggregator::aggregate(self.store.as_ref())?;
        let active_miners = investments.len() as u64;
        let difficulty =
            DifficultyEngine::compute(&self.config.factors, supply.circulating(), active_miners)?;
        info!(
            "mining run {cycle_date}: {active_miners} active miners, circulating {}, difficulty {difficulty}",
            supply.circulating()
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let started = Instant::now();
        let mut tasks = JoinSet::new();
        let mut skipped = Vec::new();

        for (investment, vault) in investments {
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    warn!(
                        "mining run {cycle_date}: deadline reached, skipping investment {}",
                        investment.id
                    );
                    skipped.push(investment.id);
                    continue;
                }
            }
            let store = Arc::clone(&self.store);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return Err(MintFailure {
                            investment_id: investment.id,
                            reason: "worker pool closed".into(),
                        })
                    }
                };
                Self::mint_one(store.as_ref(), &investment, &vault, difficulty, cycle_date)
            });
        }

        // Join barrier: the snapshot below must observe every attempt,
        // successful or not.
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(outcome)) => succeeded.push(outcome),
                Ok(Err(failure)) => {
                    warn!(
                        "mining run {cycle_date}: investment {} excluded: {}",
                        failure.investment_id, failure.reason
                    );
                    failed.push(failure);
                }
                Err(join_err) => error!("mining run {cycle_date}: worker panicked: {join_err}"),
            }
        }

        let minted: Decimal =
            amount::quantize(succeeded.iter().map(|outcome| outcome.minted).sum());

        let post = SupplyAggregator::aggregate(self.store.as_ref())?;
        let expected = previous_minted + minted;
        if post.minted != expected {
            warn!(
                "mining run {cycle_date}: ledger drift, expected total {expected}, aggregated {}",
                post.minted
            );
        }

        let stat = MiningStat {
            cycle_date,
            total_minted: post.minted,
            supply: post,
            active_miners,
            difficulty,
            created_at: Utc::now(),
        };
        self.store.append_mining_stat(&stat)?;
        self.state = RunState::Completed;
        info!(
            "mining run {cycle_date} completed: minted {minted} across {} investments ({} failed, {} skipped)",
            succeeded.len(),
            failed.len(),
            skipped.len()
        );

        Ok(RunSummary {
            cycle_date,
            state: self.state,
            difficulty,
            active_miners,
            minted,
            succeeded,
            failed,
            skipped,
        })
    }

    /// One investment's unit of work: compute the daily mint and persist the
    /// pending-balance increment plus ledger row as a single transaction.
    fn mint_one(
        store: &S,
        investment: &Investment,
        vault: &Vault,
        difficulty: Decimal,
        cycle_date: NaiveDate,
    ) -> std::result::Result<MintOutcome, MintFailure> {
        let fail = |reason: String| MintFailure {
            investment_id: investment.id,
            reason,
        };

        let projection = MiningCalculator::calculate(
            investment.mining_rate,
            investment.principal,
            difficulty,
            vault.duration_months,
        )
        .map_err(|e| fail(e.to_string()))?;

        let entry = MiningLedgerEntry {
            id: Uuid::new_v4(),
            investment_id: investment.id,
            cycle_date,
            minted: projection.daily,
            difficulty,
            created_at: Utc::now(),
        };
        store.apply_mint(&entry).map_err(|e| fail(e.to_string()))?;

        Ok(MintOutcome {
            investment_id: investment.id,
            minted: entry.minted,
        })
    }
}

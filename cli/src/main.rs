//! VaultMine operator CLI: seed reference data, run the daily mining cycle,
//! estimate returns, and inspect ledger/treasury state.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use vaultmine_core::{BoostToken, EngineStore, PayoutSchedule, Vault, VaultTier};
use vaultmine_engine::{
    DailyMiningJob, DifficultyFactors, EstimateRequest, Estimator, HttpPriceOracle, JobConfig,
};
use vaultmine_storage::SledStore;

#[derive(Parser)]
#[command(name = "vaultmine")]
#[command(about = "VaultMine yield & mining rewards engine")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the daily mining cycle (idempotent per date)
    Run {
        /// Cycle date, defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Estimate returns for a proposed investment
    Estimate {
        #[arg(long)]
        vault: String,
        #[arg(long)]
        principal: Decimal,
        /// Boost token kind: native or partner
        #[arg(long)]
        boost_token: Option<String>,
        #[arg(long)]
        boost_amount: Option<Decimal>,
    },
    /// Show ledger and treasury statistics
    Stats,
    /// Write the demo vault catalog into the store
    Seed,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    data_dir: String,
    concurrency: usize,
    oracle_url: String,
    /// Soft deadline for the daily run, in seconds.
    deadline_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: "vaultmine-data".into(),
            concurrency: 8,
            oracle_url: "http://127.0.0.1:9060".into(),
            deadline_secs: None,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn parse_boost(
    token: Option<String>,
    amount: Option<Decimal>,
) -> Result<Option<(BoostToken, Decimal)>> {
    match (token, amount) {
        (None, None) => Ok(None),
        (Some(token), Some(amount)) => {
            let token = match token.as_str() {
                "native" => BoostToken::Native,
                "partner" => BoostToken::Partner,
                other => bail!("unknown boost token '{other}', expected native or partner"),
            };
            Ok(Some((token, amount)))
        }
        _ => bail!("--boost-token and --boost-amount must be given together"),
    }
}

fn demo_vaults() -> Vec<Vault> {
    vec![
        Vault {
            id: "starter-3m".into(),
            tier: VaultTier::Starter,
            duration_months: 3,
            base_apy: dec!(6),
            max_apy: dec!(9),
            base_mining_rate: dec!(40),
            max_mining_rate: dec!(60),
            entry_lock: dec!(100),
            payout_schedule: PayoutSchedule::Monthly,
        },
        Vault {
            id: "growth-6m".into(),
            tier: VaultTier::Growth,
            duration_months: 6,
            base_apy: dec!(8),
            max_apy: dec!(12),
            base_mining_rate: dec!(55),
            max_mining_rate: dec!(80),
            entry_lock: dec!(250),
            payout_schedule: PayoutSchedule::Monthly,
        },
        Vault {
            id: "premium-12m".into(),
            tier: VaultTier::Premium,
            duration_months: 12,
            base_apy: dec!(10),
            max_apy: dec!(16),
            base_mining_rate: dec!(70),
            max_mining_rate: dec!(100),
            entry_lock: dec!(500),
            payout_schedule: PayoutSchedule::Quarterly,
        },
        Vault {
            id: "elite-24m".into(),
            tier: VaultTier::Elite,
            duration_months: 24,
            base_apy: dec!(12),
            max_apy: dec!(20),
            base_mining_rate: dec!(85),
            max_mining_rate: dec!(120),
            entry_lock: dec!(1000),
            payout_schedule: PayoutSchedule::AtMaturity,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let store = Arc::new(
        SledStore::open(&config.data_dir)
            .with_context(|| format!("opening data dir {}", config.data_dir))?,
    );

    match cli.command {
        Command::Run { date } => {
            let cycle = date.unwrap_or_else(|| Utc::now().date_naive());
            let job_config = JobConfig {
                concurrency: config.concurrency,
                deadline: config.deadline_secs.map(Duration::from_secs),
                factors: DifficultyFactors::default(),
            };
            let mut job = DailyMiningJob::new(Arc::clone(&store), job_config);
            let summary = job.run(cycle).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Estimate {
            vault,
            principal,
            boost_token,
            boost_amount,
        } => {
            let oracle = HttpPriceOracle::new(&config.oracle_url);
            let request = EstimateRequest {
                vault_id: vault,
                principal,
                boost: parse_boost(boost_token, boost_amount)?,
            };
            let estimate = Estimator::estimate(store.as_ref(), &oracle, &request).await?;
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }
        Command::Stats => {
            let latest = store.latest_mining_stat()?;
            let ledger_rows = store.ledger_entries()?.len();
            let treasury = store.treasury_pool()?.report();
            let stats = json!({
                "latest_cycle": latest,
                "ledger_rows": ledger_rows,
                "treasury": treasury,
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Seed => {
            for vault in demo_vaults() {
                store.put_vault(&vault)?;
                info!("seeded vault {}", vault.id);
            }
            println!("seeded {} vaults", demo_vaults().len());
        }
    }

    Ok(())
}

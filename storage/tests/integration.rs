//! On-disk behavior of the sled store: run-guard exclusivity, atomic mint
//! credit, and claim settlement with the row-lock re-check.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use uuid::Uuid;
use vaultmine_core::{
    ClaimRecord, EngineStore, Investment, InvestmentStatus, MiningLedgerEntry, MiningStat,
    PayoutSchedule, StoreError, SupplyBreakdown, Vault, VaultTier,
};
use vaultmine_storage::SledStore;

fn open_store() -> (TempDir, SledStore) {
    let dir = TempDir::new().unwrap();
    let store = SledStore::open(dir.path()).unwrap();
    (dir, store)
}

fn demo_vault() -> Vault {
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
    }
}

fn active_investment() -> Investment {
    let mut investment = Investment::new("dana", "premium-12m", dec!(20000));
    investment.mining_rate = dec!(70);
    investment.apy = dec!(10);
    investment.entry_locked = dec!(500);
    investment.status = InvestmentStatus::Active;
    investment
}

fn entry_for(investment_id: Uuid, cycle_date: NaiveDate, minted: Decimal) -> MiningLedgerEntry {
    MiningLedgerEntry {
        id: Uuid::new_v4(),
        investment_id,
        cycle_date,
        minted,
        difficulty: dec!(1.2),
        created_at: Utc::now(),
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn test_vault_and_investment_round_trip() {
    let (_dir, store) = open_store();
    store.put_vault(&demo_vault()).unwrap();
    let investment = active_investment();
    store.put_investment(&investment).unwrap();

    let loaded = store.investment(&investment.id).unwrap().unwrap();
    assert_eq!(loaded.principal, dec!(20000));
    assert_eq!(loaded.status, InvestmentStatus::Active);

    let joined = store.active_investments().unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].1.id, "premium-12m");
}

#[test]
fn test_run_guard_is_exclusive_per_date() {
    let (_dir, store) = open_store();
    let cycle = date("2026-08-25");

    assert!(store.claim_run_guard(cycle).unwrap());
    assert!(!store.claim_run_guard(cycle).unwrap());
    // A different cycle date is a fresh guard.
    assert!(store.claim_run_guard(date("2026-08-26")).unwrap());
}

#[test]
fn test_apply_mint_credits_and_appends_atomically() {
    let (_dir, store) = open_store();
    store.put_vault(&demo_vault()).unwrap();
    let investment = active_investment();
    store.put_investment(&investment).unwrap();

    store
        .apply_mint(&entry_for(investment.id, date("2026-08-25"), dec!(1.4)))
        .unwrap();
    store
        .apply_mint(&entry_for(investment.id, date("2026-08-26"), dec!(1.3)))
        .unwrap();

    let loaded = store.investment(&investment.id).unwrap().unwrap();
    assert_eq!(loaded.pending_reward, dec!(2.7));
    assert_eq!(loaded.total_minted, dec!(2.7));
    assert_eq!(store.ledger_entries().unwrap().len(), 2);
}

#[test]
fn test_apply_mint_unknown_investment_leaves_no_ledger_row() {
    let (_dir, store) = open_store();
    let err = store
        .apply_mint(&entry_for(Uuid::new_v4(), date("2026-08-25"), dec!(1)))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(store.ledger_entries().unwrap().is_empty());
}

#[test]
fn test_apply_claim_settles_all_four_effects() {
    let (_dir, store) = open_store();
    store.put_vault(&demo_vault()).unwrap();
    let investment = active_investment();
    store.put_investment(&investment).unwrap();
    store
        .apply_mint(&entry_for(investment.id, date("2026-08-25"), dec!(1000)))
        .unwrap();

    let record = ClaimRecord {
        id: Uuid::new_v4(),
        investment_id: investment.id,
        gross: dec!(1000),
        tax: dec!(50),
        net: dec!(950),
        destination: "wallet-1".into(),
        timestamp: Utc::now(),
    };
    store.apply_claim(&record).unwrap();

    let settled = store.investment(&investment.id).unwrap().unwrap();
    assert_eq!(settled.pending_reward, Decimal::ZERO);
    assert_eq!(settled.total_claimed, dec!(950));
    assert_eq!(store.treasury_balance().unwrap(), dec!(50));
    assert_eq!(store.claims(&investment.id).unwrap().len(), 1);

    let pool = store.treasury_pool().unwrap();
    assert_eq!(pool.report().total_collected, dec!(50));
    assert_eq!(pool.transactions().len(), 1);
}

#[test]
fn test_stale_claim_conflicts_and_mutates_nothing() {
    let (_dir, store) = open_store();
    store.put_vault(&demo_vault()).unwrap();
    let investment = active_investment();
    store.put_investment(&investment).unwrap();
    store
        .apply_mint(&entry_for(investment.id, date("2026-08-25"), dec!(1000)))
        .unwrap();

    let record = ClaimRecord {
        id: Uuid::new_v4(),
        investment_id: investment.id,
        gross: dec!(1000),
        tax: dec!(50),
        net: dec!(950),
        destination: "wallet-1".into(),
        timestamp: Utc::now(),
    };
    store.apply_claim(&record).unwrap();

    // Replaying the same claim sees a drained balance and conflicts.
    let stale = ClaimRecord {
        id: Uuid::new_v4(),
        ..record
    };
    let err = store.apply_claim(&stale).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(store.treasury_balance().unwrap(), dec!(50));
    assert_eq!(store.claims(&investment.id).unwrap().len(), 1);
    let settled = store.investment(&investment.id).unwrap().unwrap();
    assert_eq!(settled.total_claimed, dec!(950));
}

#[test]
fn test_latest_mining_stat_orders_by_cycle_date() {
    let (_dir, store) = open_store();
    for (day, minted) in [("2026-08-23", dec!(10)), ("2026-08-24", dec!(25))] {
        store
            .append_mining_stat(&MiningStat {
                cycle_date: date(day),
                total_minted: minted,
                supply: SupplyBreakdown::default(),
                active_miners: 3,
                difficulty: dec!(1.1),
                created_at: Utc::now(),
            })
            .unwrap();
    }

    let latest = store.latest_mining_stat().unwrap().unwrap();
    assert_eq!(latest.cycle_date, date("2026-08-24"));
    assert_eq!(latest.total_minted, dec!(25));
}

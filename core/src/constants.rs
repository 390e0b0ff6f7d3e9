//! Platform economic constants

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hard cap on the VMT reward-token supply.
pub const TOTAL_SUPPLY_CAP: Decimal = dec!(100_000_000);

/// Difficulty floor; difficulty at zero supply and zero miners equals this exactly.
pub const BASE_DIFFICULTY: Decimal = dec!(1);

/// Weight of the supply ratio in the difficulty formula.
pub const SUPPLY_FACTOR: Decimal = dec!(2);

/// Weight of the active-miner count in the difficulty formula.
pub const MINER_FACTOR: Decimal = dec!(0.0005);

/// VMT mined per day per 1000 invested units at a 100% mining rate, before
/// difficulty is applied.
pub const BASE_DAILY_RATE_PER_UNIT: Decimal = dec!(1);

/// Days per accounting month used by payout and mining projections.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Boost deposits count toward at most this fraction of the principal.
pub const BOOST_CAP_FRACTION: Decimal = dec!(0.5);

/// Premium applied to native VMT boost deposits.
pub const NATIVE_BOOST_MULTIPLIER: Decimal = dec!(1.25);

/// Discount applied to partner-token boost deposits.
pub const PARTNER_BOOST_DISCOUNT: Decimal = dec!(0.10);

/// Flat tax withheld from every claim and credited to the treasury.
pub const CLAIM_TAX_RATE: Decimal = dec!(0.05);

/// Fallback prices (stable units) used when the oracle is unavailable.
pub const FALLBACK_NATIVE_PRICE: Decimal = dec!(0.04);
pub const FALLBACK_PARTNER_PRICE: Decimal = dec!(1.00);

/// Price oracle request timeout.
pub const ORACLE_TIMEOUT_SECS: u64 = 5;

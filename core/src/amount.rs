//! Platform-wide decimal precision policy
//!
//! Every calculator and the ledger writer round through [`quantize`] so the
//! amounts displayed to users, credited as pending rewards, and summed for
//! invariant checks never drift apart.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places carried by every token and stable-unit amount.
pub const DECIMALS: u32 = 8;

/// Round a value to the platform precision.
pub fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a percentage figure (e.g. `12.5`) into a fraction (`0.125`).
pub fn pct(value: Decimal) -> Decimal {
    value / dec!(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_to_platform_precision() {
        assert_eq!(quantize(dec!(1.123456789)), dec!(1.12345679));
        assert_eq!(quantize(dec!(1.000000005)), dec!(1.00000001));
        assert_eq!(quantize(dec!(-1.000000005)), dec!(-1.00000001));
    }

    #[test]
    fn test_pct() {
        assert_eq!(pct(dec!(12.5)), dec!(0.125));
        assert_eq!(pct(dec!(100)), dec!(1));
        assert_eq!(pct(Decimal::ZERO), Decimal::ZERO);
    }
}

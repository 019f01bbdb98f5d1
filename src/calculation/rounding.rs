//! Currency rounding.
//!
//! All amount-bearing operations in the engine round at the point of
//! producing a final value, not at intermediate steps, to avoid compounding
//! rounding error across chained conversions.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to two decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use loon_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("2076.925").unwrap();
/// assert_eq!(round_currency(amount), Decimal::from_str("2076.93").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

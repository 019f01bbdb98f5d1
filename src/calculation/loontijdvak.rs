//! Loontijdvak classification and period conversion.
//!
//! This module determines the statutory wage period for a payroll run,
//! converts amounts between period types, and checks that an actual period
//! length is consistent with the legally expected length for its type.
//!
//! The caller's configured period frequency is authoritative: the engine
//! never infers the period type from dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PeriodTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{LoontijdvakMetadata, PeriodLengthCheck, WagePeriodType};

use super::calendar::days_inclusive;
use super::rounding::round_currency;

/// Converts an annual amount to the amount for one period of the given type.
///
/// The result is rounded to two decimals, half away from zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] when the annual amount is negative.
///
/// # Example
///
/// ```
/// use loon_engine::calculation::prorate_annual;
/// use loon_engine::config::PeriodTable;
/// use loon_engine::models::WagePeriodType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = PeriodTable::builtin();
/// let monthly = prorate_annual(Decimal::from(108_000), WagePeriodType::Monthly, &table).unwrap();
/// assert_eq!(monthly, Decimal::from_str("9000.00").unwrap());
/// ```
pub fn prorate_annual(
    annual_amount: Decimal,
    period_type: WagePeriodType,
    table: &PeriodTable,
) -> EngineResult<Decimal> {
    ensure_non_negative(annual_amount, "annual amount")?;
    Ok(round_currency(
        annual_amount * table.fraction_of_year(period_type),
    ))
}

/// Converts an amount from one period type to another.
///
/// When both types are equal the amount is returned unchanged, without
/// rounding. Otherwise the amount is scaled by the ratio of the two
/// periods-per-year constants and rounded to two decimals at the end.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] when the amount is negative.
///
/// # Example
///
/// ```
/// use loon_engine::calculation::convert;
/// use loon_engine::config::PeriodTable;
/// use loon_engine::models::WagePeriodType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = PeriodTable::builtin();
/// let yearly = convert(
///     Decimal::from(5000),
///     WagePeriodType::Monthly,
///     WagePeriodType::Yearly,
///     &table,
/// )
/// .unwrap();
/// assert_eq!(yearly, Decimal::from_str("60000.00").unwrap());
/// ```
pub fn convert(
    amount: Decimal,
    from: WagePeriodType,
    to: WagePeriodType,
    table: &PeriodTable,
) -> EngineResult<Decimal> {
    ensure_non_negative(amount, "amount")?;
    if from == to {
        return Ok(amount);
    }
    let converted = amount * Decimal::from(table.periods_per_year(from))
        / Decimal::from(table.periods_per_year(to));
    Ok(round_currency(converted))
}

/// Classifies one concrete wage period instance.
///
/// The configured type is trusted as authoritative; the boundary dates only
/// determine the actual inclusive day count of this instance.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriodDates`] when the period end is not
/// after the period start.
pub fn classify(
    period_start: NaiveDate,
    period_end: NaiveDate,
    configured_type: WagePeriodType,
    table: &PeriodTable,
) -> EngineResult<LoontijdvakMetadata> {
    if period_end <= period_start {
        return Err(EngineError::InvalidPeriodDates {
            start: period_start,
            end: period_end,
        });
    }
    Ok(LoontijdvakMetadata {
        period_type: configured_type,
        fraction: table.fraction_of_year(configured_type),
        periods_per_year: table.periods_per_year(configured_type),
        days_in_period: days_inclusive(period_start, period_end),
    })
}

/// Checks an actual period length against the expected length for its type.
///
/// The tolerance is 3 days for monthly periods (calendar months vary between
/// 28 and 31 days) and 1 day otherwise. The check is advisory: it never
/// fails, and an out-of-tolerance length yields a warning message rather than
/// an error.
pub fn validate_period_length(
    actual_days: i64,
    period_type: WagePeriodType,
    table: &PeriodTable,
) -> PeriodLengthCheck {
    let expected = table.standard_days(period_type);
    let tolerance = match period_type {
        WagePeriodType::Monthly => Decimal::from(3),
        _ => Decimal::ONE,
    };
    let deviation = (Decimal::from(actual_days) - expected).abs();
    let is_valid = deviation <= tolerance;
    let expected_days = round_currency(expected);
    let warning = if is_valid {
        None
    } else {
        Some(format!(
            "Period length of {} days is outside the expected {} days (±{} days) for a {} period",
            actual_days, expected_days, tolerance, period_type
        ))
    };
    PeriodLengthCheck {
        is_valid,
        expected_days,
        actual_days,
        warning,
    }
}

fn ensure_non_negative(amount: Decimal, label: &str) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            message: format!("{} must not be negative, got {}", label, amount),
        });
    }
    Ok(())
}

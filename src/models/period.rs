//! Wage period models.
//!
//! This module contains the [`WagePeriodType`] classification and the
//! per-run metadata records ([`LoontijdvakMetadata`], [`ProratingMetadata`],
//! [`PeriodLengthCheck`]) produced by the calculation engine.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The statutory wage period (loontijdvak) classification.
///
/// The loontijdvak governs how annual tax-law amounts are apportioned to a
/// concrete pay period. The periods-per-year constant for each variant is
/// derived from a 364-day reference year (52 weeks of 7 days) and lives in
/// [`crate::config::PeriodTable`].
///
/// # Example
///
/// ```
/// use loon_engine::models::WagePeriodType;
/// use std::str::FromStr;
///
/// let period = WagePeriodType::from_str("monthly").unwrap();
/// assert_eq!(period, WagePeriodType::Monthly);
/// assert!(WagePeriodType::from_str("fortnightly").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagePeriodType {
    /// A single-day wage period.
    Daily,
    /// A weekly wage period.
    Weekly,
    /// A monthly wage period.
    Monthly,
    /// A yearly wage period.
    Yearly,
}

impl WagePeriodType {
    /// All period type variants, in ascending period length.
    pub const ALL: [WagePeriodType; 4] = [
        WagePeriodType::Daily,
        WagePeriodType::Weekly,
        WagePeriodType::Monthly,
        WagePeriodType::Yearly,
    ];

    /// Returns the lowercase name used in configuration and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            WagePeriodType::Daily => "daily",
            WagePeriodType::Weekly => "weekly",
            WagePeriodType::Monthly => "monthly",
            WagePeriodType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for WagePeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WagePeriodType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(WagePeriodType::Daily),
            "weekly" => Ok(WagePeriodType::Weekly),
            "monthly" => Ok(WagePeriodType::Monthly),
            "yearly" => Ok(WagePeriodType::Yearly),
            other => Err(EngineError::InvalidPeriodType {
                value: other.to_string(),
            }),
        }
    }
}

/// Metadata describing one classified wage period instance.
///
/// Produced once per payroll run by
/// [`crate::calculation::classify`] and passed by value into every
/// per-employee computation of that run. It derives entirely from its two
/// constructor inputs (the configured type and the period boundaries) and is
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoontijdvakMetadata {
    /// The authoritative period type, taken from the caller's configuration.
    pub period_type: WagePeriodType,
    /// The fraction of a year this period represents (1 / periods per year).
    pub fraction: Decimal,
    /// How many periods of this type fit in the reference year.
    pub periods_per_year: u32,
    /// The actual inclusive day count of this concrete period instance.
    ///
    /// Distinct from the standard day count used for proration; see
    /// [`ProratingMetadata::standard_days`].
    pub days_in_period: i64,
}

/// Metadata describing the proration decision for one payroll run.
///
/// Computed once per run by [`crate::calculation::compute_factor`] and shared
/// read-only by every employee's component processing within that run, so all
/// employees in the same run are prorated identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProratingMetadata {
    /// The legally expected day count for the period type (364 / periods per
    /// year). Non-integral for monthly periods, hence a decimal.
    pub standard_days: Decimal,
    /// The inclusive day count of the actual worked span.
    pub actual_days: i64,
    /// The scaling factor: actual days / standard days.
    pub factor: Decimal,
    /// Whether the factor deviates from 1 by more than the tolerance.
    pub needs_prorating: bool,
    /// Human-readable explanation of the decision.
    pub reason: String,
}

/// The advisory result of checking an actual period length against the
/// legally expected length for its type.
///
/// Produced by [`crate::calculation::validate_period_length`]. A failed check
/// is logged but never blocks a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodLengthCheck {
    /// Whether the actual length is within tolerance of the expected length.
    pub is_valid: bool,
    /// The expected day count, rounded to two decimals.
    pub expected_days: Decimal,
    /// The actual day count that was checked.
    pub actual_days: i64,
    /// A warning message, present only when the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

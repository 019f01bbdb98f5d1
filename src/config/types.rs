//! Configuration types for the engine.
//!
//! The period table is process-wide immutable configuration: it is loaded
//! once at startup (from YAML or from the built-in defaults) and injected
//! into the calculation functions, never read from ambient global state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forfait::RuleTemplate;
use crate::models::WagePeriodType;

/// Day count of the statutory reference year (52 weeks of 7 days).
pub const REFERENCE_YEAR_DAYS: u32 = 364;

/// The periods-per-year table for the four wage period types.
///
/// Derived from the 364-day reference year: 364 daily periods, 52 weekly,
/// 12 monthly and 1 yearly period per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTable {
    /// Daily periods per year.
    pub daily: u32,
    /// Weekly periods per year.
    pub weekly: u32,
    /// Monthly periods per year.
    pub monthly: u32,
    /// Yearly periods per year.
    pub yearly: u32,
}

impl PeriodTable {
    /// Creates a table with explicit periods-per-year values.
    pub fn new(daily: u32, weekly: u32, monthly: u32, yearly: u32) -> Self {
        Self {
            daily,
            weekly,
            monthly,
            yearly,
        }
    }

    /// Returns the statutory table derived from the 364-day reference year.
    pub fn builtin() -> Self {
        Self::new(364, 52, 12, 1)
    }

    /// Returns how many periods of the given type fit in a year.
    pub fn periods_per_year(&self, period_type: WagePeriodType) -> u32 {
        match period_type {
            WagePeriodType::Daily => self.daily,
            WagePeriodType::Weekly => self.weekly,
            WagePeriodType::Monthly => self.monthly,
            WagePeriodType::Yearly => self.yearly,
        }
    }

    /// Returns the fraction of a year one period of the given type covers.
    ///
    /// Zero when the table carries no periods for the type, so a degenerate
    /// table cannot cause a division by zero.
    pub fn fraction_of_year(&self, period_type: WagePeriodType) -> Decimal {
        let periods = self.periods_per_year(period_type);
        if periods == 0 {
            Decimal::ZERO
        } else {
            Decimal::ONE / Decimal::from(periods)
        }
    }

    /// Returns the legally expected day count of one period of the given
    /// type (reference year days / periods per year).
    ///
    /// Zero when the table carries no periods for the type.
    pub fn standard_days(&self, period_type: WagePeriodType) -> Decimal {
        let periods = self.periods_per_year(period_type);
        if periods == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(REFERENCE_YEAR_DAYS) / Decimal::from(periods)
        }
    }
}

impl Default for PeriodTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The complete engine configuration.
///
/// Aggregates the period table and the predefined forfait rule templates,
/// loaded from YAML by [`super::ConfigLoader`] or supplied by
/// [`EngineConfig::builtin`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// The periods-per-year table.
    pub period_table: PeriodTable,
    /// Predefined forfait rule templates.
    pub templates: Vec<RuleTemplate>,
}

impl EngineConfig {
    /// Returns the built-in configuration without touching the filesystem.
    pub fn builtin() -> Self {
        Self {
            period_table: PeriodTable::builtin(),
            templates: crate::forfait::builtin_templates(),
        }
    }

    /// Looks up a rule template by its key.
    pub fn template(&self, key: &str) -> Option<&RuleTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }
}

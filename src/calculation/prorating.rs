//! Proration of component amounts to the actual worked span.
//!
//! A payroll run's actual worked span can be shorter than the standard
//! length of its classified period, e.g. for a new hire starting mid-period.
//! The proration factor is computed once per run and applied uniformly to
//! every participating component of every employee in that run.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PeriodTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeTotals, LoontijdvakMetadata, ComponentType, ProratedComponent, ProratingMetadata,
};

use super::amounts::ResolvedComponent;
use super::calendar::days_inclusive;
use super::rounding::round_currency;

/// Returns the deviation tolerance below which no proration is applied.
///
/// A factor within 0.001 of 1 is treated as a full period.
pub fn proration_tolerance() -> Decimal {
    Decimal::new(1, 3)
}

/// Computes the run-wide proration factor.
///
/// The standard day count is the legal constant for the period type
/// (364 / periods per year), deliberately distinct from the classified
/// period's actual `days_in_period`: the two diverge when the run's work
/// window is shorter than the employee's normal pay cycle.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriodDates`] when the actual span's end
/// lies before its start. A single-day span (start equal to end) is valid.
pub fn compute_factor(
    metadata: &LoontijdvakMetadata,
    table: &PeriodTable,
    actual_period_start: NaiveDate,
    actual_period_end: NaiveDate,
) -> EngineResult<ProratingMetadata> {
    if actual_period_end < actual_period_start {
        return Err(EngineError::InvalidPeriodDates {
            start: actual_period_start,
            end: actual_period_end,
        });
    }

    let standard_days = table.standard_days(metadata.period_type);
    let actual_days = days_inclusive(actual_period_start, actual_period_end);
    let factor = if standard_days.is_zero() {
        Decimal::ONE
    } else {
        Decimal::from(actual_days) / standard_days
    };
    let needs_prorating = (factor - Decimal::ONE).abs() > proration_tolerance();
    let reason = if needs_prorating {
        format!(
            "Actual span of {} days deviates from the standard {} days for a {} period",
            actual_days,
            round_currency(standard_days),
            metadata.period_type
        )
    } else {
        format!(
            "Actual span of {} days matches the standard length for a {} period",
            actual_days, metadata.period_type
        )
    };

    Ok(ProratingMetadata {
        standard_days,
        actual_days,
        factor,
        needs_prorating,
        reason,
    })
}

/// Applies the run-wide proration decision to a set of resolved components.
///
/// A component is scaled only when the run needs prorating and the component
/// has not opted out. Scaled amounts are rounded to two decimals; untouched
/// amounts keep their original value and record a factor of 1.
pub fn apply_to_components(
    components: &[ResolvedComponent],
    prorating: &ProratingMetadata,
) -> Vec<ProratedComponent> {
    components
        .iter()
        .map(|resolved| {
            let scales = prorating.needs_prorating && resolved.component.prorate;
            let (amount, factor) = if scales {
                (
                    round_currency(resolved.amount * prorating.factor),
                    prorating.factor,
                )
            } else {
                (resolved.amount, Decimal::ONE)
            };
            ProratedComponent {
                code: resolved.component.code.clone(),
                component_type: resolved.component.component_type,
                original_amount: resolved.amount,
                amount,
                was_prorated: scales,
                factor,
            }
        })
        .collect()
}

/// Aggregates final component amounts into per-employee totals.
///
/// Sums are taken first and rounded afterwards, so cent drift cannot
/// accumulate across many components. Net pay is gross pay minus deductions,
/// rounded independently.
pub fn aggregate_totals(components: &[ProratedComponent]) -> EmployeeTotals {
    let sum_of = |wanted: ComponentType| -> Decimal {
        components
            .iter()
            .filter(|c| c.component_type == wanted)
            .map(|c| c.amount)
            .sum()
    };
    let gross_pay = round_currency(sum_of(ComponentType::Earning));
    let deductions = round_currency(sum_of(ComponentType::Deduction));
    let net_pay = round_currency(gross_pay - deductions);
    EmployeeTotals {
        gross_pay,
        deductions,
        net_pay,
    }
}

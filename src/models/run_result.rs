//! Payroll run result models.
//!
//! This module contains the input and output records for one payroll run:
//! the raw per-employee components going in, and the prorated amounts,
//! per-component provenance and aggregate totals coming out.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComponentType, LoontijdvakMetadata, PeriodLengthCheck, ProratingMetadata};

/// A raw pay component entering a payroll run for one employee.
///
/// The amount is either supplied directly or evaluated from a formula
/// expression with the given variables. A component may opt out of proration
/// with `prorate: false`, e.g. a fixed statutory allowance that must not
/// scale with partial periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunComponent {
    /// Code of the wage component.
    pub code: String,
    /// The broad classification of the component.
    pub component_type: ComponentType,
    /// The period amount, when known up front.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Formula expression to evaluate when no amount is supplied.
    #[serde(default)]
    pub formula: Option<String>,
    /// Variables available to the formula evaluator.
    #[serde(default)]
    pub variables: HashMap<String, Decimal>,
    /// Whether the component participates in proration.
    #[serde(default = "default_prorate")]
    pub prorate: bool,
}

fn default_prorate() -> bool {
    true
}

/// One component's amount after the proration decision, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProratedComponent {
    /// Code of the wage component.
    pub code: String,
    /// The broad classification of the component.
    pub component_type: ComponentType,
    /// The amount before proration.
    pub original_amount: Decimal,
    /// The final amount after proration and rounding.
    pub amount: Decimal,
    /// Whether the amount was scaled.
    pub was_prorated: bool,
    /// The factor that was applied; 1 when the amount was left untouched.
    pub factor: Decimal,
}

/// Aggregate pay totals for one employee in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// Sum of final earning amounts, rounded to two decimals.
    pub gross_pay: Decimal,
    /// Sum of final deduction amounts, rounded to two decimals.
    pub deductions: Decimal,
    /// Gross pay minus deductions, rounded to two decimals.
    pub net_pay: Decimal,
}

/// The calculation outcome for one employee in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRunResult {
    /// The employee this result belongs to.
    pub employee_id: String,
    /// Every component with its proration provenance.
    pub components: Vec<ProratedComponent>,
    /// Aggregate totals for the employee.
    pub totals: EmployeeTotals,
}

/// A warning generated during a payroll run.
///
/// Warnings are advisory; they never block the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete output record of one payroll run.
///
/// The period classification and proration metadata are computed exactly once
/// per run and shared across all employees, so every employee in the run is
/// prorated identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRunResult {
    /// Unique identifier of this run.
    pub run_id: Uuid,
    /// When the run was calculated.
    pub calculated_at: DateTime<Utc>,
    /// The organization the run belongs to.
    pub organization_id: String,
    /// The classified wage period.
    pub loontijdvak: LoontijdvakMetadata,
    /// The run-wide proration decision.
    pub prorating: ProratingMetadata,
    /// Advisory check of the classified period length.
    pub period_check: PeriodLengthCheck,
    /// Per-employee results.
    pub employees: Vec<EmployeeRunResult>,
    /// Advisory warnings collected during the run.
    pub warnings: Vec<RunWarning>,
}

//! Request types for the engine's HTTP facade.
//!
//! This module defines the JSON request structures for the payroll run,
//! forfait rule and assignment endpoints.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ComponentType, ForfaitRuleDraft, RunComponent};

/// Request body for the `/payroll-run/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The organization running payroll.
    pub organization_id: String,
    /// The start date of the wage period (inclusive).
    pub period_start: NaiveDate,
    /// The end date of the wage period (inclusive).
    pub period_end: NaiveDate,
    /// The configured wage period type (e.g. "monthly").
    pub period_type: String,
    /// Start of the actually worked span; defaults to the period start.
    #[serde(default)]
    pub actual_period_start: Option<NaiveDate>,
    /// End of the actually worked span; defaults to the period end.
    #[serde(default)]
    pub actual_period_end: Option<NaiveDate>,
    /// Employees and their raw components for this run.
    #[serde(default)]
    pub employees: Vec<EmployeeComponentsRequest>,
}

/// One employee's raw components in a payroll run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeComponentsRequest {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The employee's raw pay components.
    #[serde(default)]
    pub components: Vec<RunComponentRequest>,
}

/// A raw pay component in a payroll run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunComponentRequest {
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

impl From<RunComponentRequest> for RunComponent {
    fn from(req: RunComponentRequest) -> Self {
        RunComponent {
            code: req.code,
            component_type: req.component_type,
            amount: req.amount,
            formula: req.formula,
            variables: req.variables,
            prorate: req.prorate,
        }
    }
}

/// Request body for creating an employee component assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    /// The organization the assignment belongs to.
    pub organization_id: String,
    /// The employee receiving the assignment.
    pub employee_id: String,
    /// Code of the wage component being assigned.
    pub component_code: String,
    /// First day the assignment is effective (inclusive).
    pub effective_from: NaiveDate,
    /// Day the assignment stops being effective (exclusive); open-ended
    /// when absent.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Free-form configuration for the assignment.
    #[serde(default = "empty_configuration")]
    pub configuration: Value,
    /// Optional override of the calculated amount.
    #[serde(default)]
    pub override_amount: Option<Decimal>,
    /// Optional override of the component's formula.
    #[serde(default)]
    pub override_formula: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn empty_configuration() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Request body for updating an assignment's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    /// The organization the assignment belongs to.
    pub organization_id: String,
    /// The replacement configuration tree.
    pub configuration: Value,
}

/// Request body for configuring a forfait rule on a benefit component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetForfaitRuleRequest {
    /// The organization the component belongs to.
    pub organization_id: String,
    /// Who is configuring the rule, for the audit stamp.
    pub actor_id: String,
    /// The rule to store.
    pub rule: ForfaitRuleDraft,
}

/// Request body for endpoints that only need an organization scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationRequest {
    /// The organization the operation applies to.
    pub organization_id: String,
}

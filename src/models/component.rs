//! Wage component model.
//!
//! This module defines the reusable [`WageComponent`] definition and its
//! classification enums. Components are configured per organization and
//! referenced by employee assignments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ForfaitRule;

/// The broad classification of a wage component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Adds to gross pay (salary, bonus, overtime).
    Earning,
    /// Subtracts from net pay (pension contribution, wage garnishment).
    Deduction,
    /// A benefit in kind granted to the employee (company car, housing).
    Benefit,
    /// A tax or levy component, including derived forfait valuations.
    Tax,
    /// An expense reimbursement, outside gross pay.
    Reimbursement,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Earning => "earning",
            ComponentType::Deduction => "deduction",
            ComponentType::Benefit => "benefit",
            ComponentType::Tax => "tax",
            ComponentType::Reimbursement => "reimbursement",
        };
        f.write_str(name)
    }
}

/// How a component's amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// A fixed amount per period.
    Fixed,
    /// A percentage of some base amount.
    Percentage,
    /// Derived from worked hours.
    HoursBased,
    /// Evaluated from a formula expression by the external evaluator.
    Formula,
    /// A rate multiplied by a unit count.
    UnitBased,
}

/// A reusable wage component definition.
///
/// The `code` is unique within an organization and immutable after creation,
/// as is the `calculation_kind`. System-defined components cannot be deleted.
/// A benefit component may carry a [`ForfaitRule`] describing the secondary
/// component to derive whenever this benefit is assigned to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageComponent {
    /// Unique identifier.
    pub id: Uuid,
    /// The organization this component belongs to.
    pub organization_id: String,
    /// Organization-unique code, immutable after creation.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The broad classification of this component.
    pub component_type: ComponentType,
    /// How the amount is determined, immutable after creation.
    pub calculation_kind: CalculationKind,
    /// Formula expression, for formula-kind components.
    #[serde(default)]
    pub formula: Option<String>,
    /// Whether the component may be used in new assignments.
    pub active: bool,
    /// System-defined components are immutable and non-deletable.
    pub system_defined: bool,
    /// Forfait propagation rule, stored as metadata on the benefit component.
    #[serde(default)]
    pub forfait_rule: Option<ForfaitRule>,
    /// Soft-delete timestamp; a deleted component is retained for audit.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WageComponent {
    /// Creates an active, user-defined component with no rule attached.
    pub fn new(
        organization_id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        component_type: ComponentType,
        calculation_kind: CalculationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id: organization_id.into(),
            code: code.into(),
            name: name.into(),
            component_type,
            calculation_kind,
            formula: None,
            active: true,
            system_defined: false,
            forfait_rule: None,
            deleted_at: None,
        }
    }

    /// Whether the component has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_component_is_active_and_undeleted() {
        let component = WageComponent::new(
            "org_001",
            "company_car",
            "Company car",
            ComponentType::Benefit,
            CalculationKind::Fixed,
        );
        assert!(component.active);
        assert!(!component.system_defined);
        assert!(!component.is_deleted());
        assert!(component.forfait_rule.is_none());
    }

    #[test]
    fn test_component_type_serializes_snake_case() {
        let json = serde_json::to_string(&ComponentType::Reimbursement).unwrap();
        assert_eq!(json, "\"reimbursement\"");
    }

    #[test]
    fn test_calculation_kind_deserializes_snake_case() {
        let kind: CalculationKind = serde_json::from_str("\"hours_based\"").unwrap();
        assert_eq!(kind, CalculationKind::HoursBased);
    }

    #[test]
    fn test_component_round_trips_through_json() {
        let component = WageComponent::new(
            "org_001",
            "pension",
            "Pension contribution",
            ComponentType::Deduction,
            CalculationKind::Percentage,
        );
        let json = serde_json::to_string(&component).unwrap();
        let back: WageComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, component);
    }
}

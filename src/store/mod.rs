//! Collaborator seams for persistence, time and formula evaluation.
//!
//! The engine core is pure; every suspension point is a lookup against one
//! of these traits. Production deployments back them with real persistence;
//! the in-memory implementations in this module serve the HTTP facade and
//! the test suites, and enforce the same consistency constraints a database
//! schema would (assignment overlap, derived-link uniqueness).

mod memory;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeComponentAssignment, WageComponent};

pub use memory::InMemoryStore;

/// Lookup and persistence of wage component definitions.
pub trait ComponentStore: Send + Sync {
    /// Finds a live (not soft-deleted) component by organization and code.
    fn find_by_code(&self, organization_id: &str, code: &str) -> Option<WageComponent>;

    /// Inserts or replaces a component, keyed by organization and code.
    fn save(&self, component: WageComponent);

    /// Soft-deletes a component.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ComponentNotFound`] when no live component
    /// matches, and [`EngineError::ComponentInUse`] when live assignments
    /// still reference the component.
    fn soft_delete(&self, organization_id: &str, code: &str, at: DateTime<Utc>)
    -> EngineResult<()>;
}

/// Lookup and persistence of employee component assignments.
pub trait AssignmentStore: Send + Sync {
    /// Finds an assignment by id, live or soft-deleted.
    fn find_by_id(&self, id: Uuid) -> Option<EmployeeComponentAssignment>;

    /// Finds the live derived assignment linked to a source assignment.
    fn find_derived_for_source(&self, source_id: Uuid) -> Option<EmployeeComponentAssignment>;

    /// Inserts a new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OverlappingAssignment`] when the effective
    /// range overlaps a live assignment of the same employee and component,
    /// and [`EngineError::DuplicateDerivedAssignment`] when a live derived
    /// assignment already exists for the same source.
    fn insert(
        &self,
        assignment: EmployeeComponentAssignment,
    ) -> EngineResult<EmployeeComponentAssignment>;

    /// Replaces an existing assignment, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AssignmentNotFound`] when the id is unknown.
    fn update(
        &self,
        assignment: EmployeeComponentAssignment,
    ) -> EngineResult<EmployeeComponentAssignment>;

    /// Soft-deletes a live assignment.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AssignmentNotFound`] when the id is unknown or
    /// the assignment was already deleted.
    fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> EngineResult<EmployeeComponentAssignment>;
}

/// Source of the current time, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    /// Returns the current timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports the given instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// The numeric result of evaluating a formula expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaOutcome {
    /// The evaluated value.
    pub value: Decimal,
    /// The variables the expression actually used.
    pub variables_used: Vec<String>,
}

/// The external formula evaluator, consumed as a black box.
///
/// The engine never parses or interprets formula syntax itself.
pub trait FormulaEvaluator: Send + Sync {
    /// Evaluates an expression against a variable mapping.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FormulaError`] when the expression cannot be
    /// evaluated.
    fn evaluate(
        &self,
        expression: &str,
        variables: &HashMap<String, Decimal>,
    ) -> EngineResult<FormulaOutcome>;
}

/// A minimal evaluator that resolves an expression consisting of a single
/// variable reference.
///
/// Stands in for the external evaluator in tests and the default HTTP
/// facade wiring.
#[derive(Debug, Clone, Default)]
pub struct LookupFormulaEvaluator;

impl FormulaEvaluator for LookupFormulaEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        variables: &HashMap<String, Decimal>,
    ) -> EngineResult<FormulaOutcome> {
        let name = expression.trim();
        match variables.get(name) {
            Some(value) => Ok(FormulaOutcome {
                value: *value,
                variables_used: vec![name.to_string()],
            }),
            None => Err(EngineError::FormulaError {
                message: format!("unknown variable '{}'", name),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_fixed_clock_reports_its_instant() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_lookup_evaluator_resolves_variable() {
        let mut variables = HashMap::new();
        variables.insert("base".to_string(), Decimal::from_str("12.34").unwrap());
        let outcome = LookupFormulaEvaluator
            .evaluate(" base ", &variables)
            .unwrap();
        assert_eq!(outcome.value, Decimal::from_str("12.34").unwrap());
        assert_eq!(outcome.variables_used, vec!["base".to_string()]);
    }

    #[test]
    fn test_lookup_evaluator_rejects_unknown_variable() {
        let result = LookupFormulaEvaluator.evaluate("missing", &HashMap::new());
        assert!(matches!(
            result.unwrap_err(),
            EngineError::FormulaError { .. }
        ));
    }
}

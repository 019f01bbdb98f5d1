//! Component amount resolution.
//!
//! Raw run components either carry their period amount directly or reference
//! a formula expression. Formula expressions are handed to the external
//! evaluator as a black box; the engine never parses formula syntax itself.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::RunComponent;
use crate::store::FormulaEvaluator;

/// A run component together with its resolved period amount.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponent {
    /// The raw component as supplied to the run.
    pub component: RunComponent,
    /// The resolved amount before proration.
    pub amount: Decimal,
}

/// Resolves the period amount of a single run component.
///
/// A directly supplied amount takes precedence over a formula. Components
/// that carry neither are rejected.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] when the component has neither an
/// amount nor a formula, or propagates the evaluator's error for a failing
/// expression.
pub fn resolve_amount(
    component: &RunComponent,
    evaluator: &dyn FormulaEvaluator,
) -> EngineResult<Decimal> {
    if let Some(amount) = component.amount {
        return Ok(amount);
    }
    if let Some(formula) = &component.formula {
        let outcome = evaluator.evaluate(formula, &component.variables)?;
        return Ok(outcome.value);
    }
    Err(EngineError::InvalidAmount {
        message: format!(
            "component '{}' has neither an amount nor a formula",
            component.code
        ),
    })
}

/// Resolves the amounts of every component in a run input.
pub fn resolve_components(
    components: Vec<RunComponent>,
    evaluator: &dyn FormulaEvaluator,
) -> EngineResult<Vec<ResolvedComponent>> {
    components
        .into_iter()
        .map(|component| {
            let amount = resolve_amount(&component, evaluator)?;
            Ok(ResolvedComponent { component, amount })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentType;
    use crate::store::LookupFormulaEvaluator;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn component_with_amount(code: &str, amount: &str) -> RunComponent {
        RunComponent {
            code: code.to_string(),
            component_type: ComponentType::Earning,
            amount: Some(dec(amount)),
            formula: None,
            variables: HashMap::new(),
            prorate: true,
        }
    }

    #[test]
    fn test_direct_amount_is_used_as_is() {
        let component = component_with_amount("base_salary", "3500.00");
        let evaluator = LookupFormulaEvaluator;
        assert_eq!(
            resolve_amount(&component, &evaluator).unwrap(),
            dec("3500.00")
        );
    }

    #[test]
    fn test_formula_is_evaluated_when_no_amount_given() {
        let mut variables = HashMap::new();
        variables.insert("hourly_rate".to_string(), dec("28.50"));
        let component = RunComponent {
            code: "overtime".to_string(),
            component_type: ComponentType::Earning,
            amount: None,
            formula: Some("hourly_rate".to_string()),
            variables,
            prorate: true,
        };
        let evaluator = LookupFormulaEvaluator;
        assert_eq!(resolve_amount(&component, &evaluator).unwrap(), dec("28.50"));
    }

    #[test]
    fn test_direct_amount_takes_precedence_over_formula() {
        let mut component = component_with_amount("bonus", "500.00");
        component.formula = Some("hourly_rate".to_string());
        let evaluator = LookupFormulaEvaluator;
        assert_eq!(resolve_amount(&component, &evaluator).unwrap(), dec("500.00"));
    }

    #[test]
    fn test_component_without_amount_or_formula_is_rejected() {
        let component = RunComponent {
            code: "mystery".to_string(),
            component_type: ComponentType::Earning,
            amount: None,
            formula: None,
            variables: HashMap::new(),
            prorate: true,
        };
        let evaluator = LookupFormulaEvaluator;
        match resolve_amount(&component, &evaluator).unwrap_err() {
            EngineError::InvalidAmount { message } => {
                assert!(message.contains("mystery"));
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_components_propagates_evaluator_error() {
        let component = RunComponent {
            code: "broken".to_string(),
            component_type: ComponentType::Earning,
            amount: None,
            formula: Some("unknown_variable".to_string()),
            variables: HashMap::new(),
            prorate: true,
        };
        let evaluator = LookupFormulaEvaluator;
        let result = resolve_components(vec![component], &evaluator);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::FormulaError { .. }
        ));
    }
}

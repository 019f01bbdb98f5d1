//! Error types for the Loontijdvak and Forfait Propagation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during period classification,
//! proration and forfait propagation.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use loon_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriodType {
///     value: "fortnightly".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid wage period type: fortnightly");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A wage period type string did not match any known variant.
    #[error("Invalid wage period type: {value}")]
    InvalidPeriodType {
        /// The unrecognized period type value.
        value: String,
    },

    /// Period boundary dates were inconsistent (end not after start).
    #[error("Invalid period dates: end {end} must be after start {start}")]
    InvalidPeriodDates {
        /// The period start date.
        start: NaiveDate,
        /// The period end date.
        end: NaiveDate,
    },

    /// An amount was negative or otherwise unusable for calculation.
    #[error("Invalid amount: {message}")]
    InvalidAmount {
        /// A description of what made the amount invalid.
        message: String,
    },

    /// A wage component was not found for the given code and organization.
    #[error("Wage component not found: {code}")]
    ComponentNotFound {
        /// The component code that was not found.
        code: String,
    },

    /// An employee component assignment was not found.
    #[error("Assignment not found: {id}")]
    AssignmentNotFound {
        /// The id of the missing assignment.
        id: Uuid,
    },

    /// A forfait rule was malformed or referenced an unsuitable component.
    #[error("Invalid forfait rule: {message}")]
    InvalidForfaitRule {
        /// A description of the rule problem.
        message: String,
    },

    /// Required target fields were absent after value mapping.
    ///
    /// Carries every missing field, not just the first one found.
    #[error("Missing required mapped fields: {}", fields.join(", "))]
    MissingMappedFields {
        /// The target field paths that resolved to nothing.
        fields: Vec<String>,
    },

    /// Two assignments for the same employee and component overlap in time.
    #[error("Assignment for employee '{employee_id}' overlaps an existing assignment of component '{component_code}'")]
    OverlappingAssignment {
        /// The employee the assignment belongs to.
        employee_id: String,
        /// The component code of the conflicting assignment.
        component_code: String,
    },

    /// A second live derived assignment was attempted for one source.
    #[error("A derived assignment already exists for source assignment {source_id}")]
    DuplicateDerivedAssignment {
        /// The source benefit assignment id.
        source_id: Uuid,
    },

    /// A component could not be soft-deleted while assignments reference it.
    #[error("Wage component '{code}' still has active assignments and cannot be deleted")]
    ComponentInUse {
        /// The component code.
        code: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The formula evaluator rejected an expression.
    #[error("Formula evaluation failed: {message}")]
    FormulaError {
        /// A description of the evaluation failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_period_type_displays_value() {
        let error = EngineError::InvalidPeriodType {
            value: "fortnightly".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid wage period type: fortnightly");
    }

    #[test]
    fn test_invalid_period_dates_displays_both_dates() {
        let error = EngineError::InvalidPeriodDates {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period dates: end 2026-01-01 must be after start 2026-02-01"
        );
    }

    #[test]
    fn test_component_not_found_displays_code() {
        let error = EngineError::ComponentNotFound {
            code: "car_forfait".to_string(),
        };
        assert_eq!(error.to_string(), "Wage component not found: car_forfait");
    }

    #[test]
    fn test_missing_mapped_fields_joins_all_fields() {
        let error = EngineError::MissingMappedFields {
            fields: vec![
                "valuation.catalog_value".to_string(),
                "valuation.percentage".to_string(),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Missing required mapped fields: valuation.catalog_value, valuation.percentage"
        );
    }

    #[test]
    fn test_overlapping_assignment_displays_employee_and_component() {
        let error = EngineError::OverlappingAssignment {
            employee_id: "emp_001".to_string(),
            component_code: "company_car".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Assignment for employee 'emp_001' overlaps an existing assignment of component 'company_car'"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_component_not_found() -> EngineResult<()> {
            Err(EngineError::ComponentNotFound {
                code: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_component_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

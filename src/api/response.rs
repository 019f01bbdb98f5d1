//! Response types for the engine's HTTP facade.
//!
//! This module defines the error envelope and the success payloads for the
//! forfait rule and assignment endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::forfait::PropagationOutcome;
use crate::models::{EmployeeComponentAssignment, ForfaitRule};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::InvalidPeriodType { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PERIOD_TYPE")
            }
            EngineError::InvalidPeriodDates { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PERIOD_DATES")
            }
            EngineError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            EngineError::InvalidForfaitRule { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_FORFAIT_RULE")
            }
            EngineError::MissingMappedFields { .. } => {
                (StatusCode::BAD_REQUEST, "MISSING_MAPPED_FIELDS")
            }
            EngineError::FormulaError { .. } => (StatusCode::BAD_REQUEST, "FORMULA_ERROR"),
            EngineError::ComponentNotFound { .. } => {
                (StatusCode::NOT_FOUND, "COMPONENT_NOT_FOUND")
            }
            EngineError::AssignmentNotFound { .. } => {
                (StatusCode::NOT_FOUND, "ASSIGNMENT_NOT_FOUND")
            }
            EngineError::OverlappingAssignment { .. } => {
                (StatusCode::CONFLICT, "OVERLAPPING_ASSIGNMENT")
            }
            EngineError::DuplicateDerivedAssignment { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_DERIVED_ASSIGNMENT")
            }
            EngineError::ComponentInUse { .. } => (StatusCode::CONFLICT, "COMPONENT_IN_USE"),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// The propagation outcome attached to an assignment response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationResponse {
    /// Short status label: created, updated, deleted, skipped or failed.
    pub status: String,
    /// Why propagation was skipped or failed, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The derived assignment that was touched, when one was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_assignment: Option<EmployeeComponentAssignment>,
}

impl From<PropagationOutcome> for PropagationResponse {
    fn from(outcome: PropagationOutcome) -> Self {
        let status = outcome.status().to_string();
        match outcome {
            PropagationOutcome::Created(assignment)
            | PropagationOutcome::Updated(assignment)
            | PropagationOutcome::Deleted(assignment) => Self {
                status,
                reason: None,
                derived_assignment: Some(assignment),
            },
            PropagationOutcome::Skipped { reason } | PropagationOutcome::Failed { reason } => {
                Self {
                    status,
                    reason: Some(reason),
                    derived_assignment: None,
                }
            }
        }
    }
}

/// Response payload for the assignment lifecycle endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponse {
    /// The primary assignment the operation touched.
    pub assignment: EmployeeComponentAssignment,
    /// What the propagation engine did as a consequence.
    pub propagation: PropagationResponse,
}

/// Response payload for the forfait rule endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForfaitRuleResponse {
    /// The benefit component the rule is attached to.
    pub component_code: String,
    /// The stored rule.
    pub rule: ForfaitRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::ComponentNotFound {
            code: "missing".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "COMPONENT_NOT_FOUND");
    }

    #[test]
    fn test_overlap_maps_to_409() {
        let response: ApiErrorResponse = EngineError::OverlappingAssignment {
            employee_id: "emp_001".to_string(),
            component_code: "company_car".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_period_type_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InvalidPeriodType {
            value: "fortnightly".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_PERIOD_TYPE");
    }

    #[test]
    fn test_skipped_outcome_serializes_reason_without_assignment() {
        let response: PropagationResponse = PropagationOutcome::Skipped {
            reason: "no enabled forfait rule".to_string(),
        }
        .into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"skipped\""));
        assert!(json.contains("no enabled forfait rule"));
        assert!(!json.contains("derived_assignment"));
    }

    #[test]
    fn test_error_details_are_omitted_when_absent() {
        let error = ApiError::validation_error("component is inactive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("details"));
    }
}

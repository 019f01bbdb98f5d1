//! HTTP request handlers for the engine's facade.
//!
//! The handlers are thin: every decision of consequence lives in the
//! calculation and forfait modules. Propagation outcomes are reported in the
//! response but never fail the primary operation.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_totals, apply_to_components, classify, compute_factor, resolve_components,
    validate_period_length,
};
use crate::error::EngineResult;
use crate::models::{
    EmployeeComponentAssignment, EmployeeRunResult, PayrollRunResult, RunComponent, RunWarning,
    WagePeriodType,
};
use crate::store::{AssignmentStore, Clock, ComponentStore};

use super::request::{
    CreateAssignmentRequest, OrganizationRequest, PayrollRunRequest, SetForfaitRuleRequest,
    UpdateAssignmentRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AssignmentResponse, ForfaitRuleResponse, PropagationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll-run/calculate", post(calculate_payroll_run))
        .route(
            "/components/:code/forfait-rule",
            post(set_forfait_rule).delete(remove_forfait_rule),
        )
        .route("/assignments", post(create_assignment))
        .route(
            "/assignments/:id",
            put(update_assignment).delete(delete_assignment),
        )
        .with_state(state)
}

/// Handler for `POST /payroll-run/calculate`.
async fn calculate_payroll_run(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Rejected payroll run payload"
            );
            let error = if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        organization = %request.organization_id,
        employees = request.employees.len(),
        "Processing payroll run"
    );

    let period_type = match WagePeriodType::from_str(&request.period_type) {
        Ok(period_type) => period_type,
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Unknown period type");
            return ApiErrorResponse::from(error).into_response();
        }
    };

    match perform_payroll_run(&state, &request, period_type) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %result.run_id,
                needs_prorating = result.prorating.needs_prorating,
                "Payroll run calculated"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll run failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Runs the period classification, the run-wide proration decision and the
/// per-employee component processing.
///
/// Classification and the proration factor are computed exactly once and
/// shared by value across every employee, so all employees in one run are
/// prorated identically.
fn perform_payroll_run(
    state: &AppState,
    request: &PayrollRunRequest,
    period_type: WagePeriodType,
) -> EngineResult<PayrollRunResult> {
    let table = &state.config().period_table;

    let loontijdvak = classify(request.period_start, request.period_end, period_type, table)?;

    let period_check = validate_period_length(loontijdvak.days_in_period, period_type, table);
    let mut warnings = Vec::new();
    if let Some(warning) = &period_check.warning {
        warn!(warning = %warning, "Period length check failed");
        warnings.push(RunWarning {
            code: "PERIOD_LENGTH_MISMATCH".to_string(),
            message: warning.clone(),
            severity: "low".to_string(),
        });
    }

    let actual_start = request.actual_period_start.unwrap_or(request.period_start);
    let actual_end = request.actual_period_end.unwrap_or(request.period_end);
    let prorating = compute_factor(&loontijdvak, table, actual_start, actual_end)?;

    // Per-employee processing is independent; only the shared read-only
    // metadata crosses employee boundaries.
    let employees = request
        .employees
        .iter()
        .map(|employee| {
            let components: Vec<RunComponent> = employee
                .components
                .iter()
                .cloned()
                .map(Into::into)
                .collect();
            let resolved = resolve_components(components, state.evaluator())?;
            let prorated = apply_to_components(&resolved, &prorating);
            let totals = aggregate_totals(&prorated);
            Ok(EmployeeRunResult {
                employee_id: employee.employee_id.clone(),
                components: prorated,
                totals,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(PayrollRunResult {
        run_id: Uuid::new_v4(),
        calculated_at: state.clock().now(),
        organization_id: request.organization_id.clone(),
        loontijdvak,
        prorating,
        period_check,
        employees,
        warnings,
    })
}

/// Handler for `POST /components/:code/forfait-rule`.
async fn set_forfait_rule(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<SetForfaitRuleRequest>,
) -> Response {
    match state.registry().set_rule(
        &request.organization_id,
        &code,
        request.rule,
        &request.actor_id,
    ) {
        Ok(rule) => (
            StatusCode::OK,
            Json(ForfaitRuleResponse {
                component_code: code,
                rule,
            }),
        )
            .into_response(),
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}

/// Handler for `DELETE /components/:code/forfait-rule`.
async fn remove_forfait_rule(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<OrganizationRequest>,
) -> Response {
    match state.registry().remove_rule(&request.organization_id, &code) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}

/// Handler for `POST /assignments`.
async fn create_assignment(
    State(state): State<AppState>,
    Json(request): Json<CreateAssignmentRequest>,
) -> Response {
    let Some(component) = state
        .store()
        .find_by_code(&request.organization_id, &request.component_code)
    else {
        return ApiErrorResponse::from(crate::error::EngineError::ComponentNotFound {
            code: request.component_code,
        })
        .into_response();
    };
    if !component.active {
        let error = ApiError::validation_error(format!(
            "component '{}' is inactive and cannot be assigned",
            component.code
        ));
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let mut assignment = EmployeeComponentAssignment::new(
        request.employee_id,
        component.id,
        component.code,
        request.effective_from,
        request.effective_to,
    );
    assignment.configuration = request.configuration;
    assignment.override_amount = request.override_amount;
    assignment.override_formula = request.override_formula;
    assignment.notes = request.notes;

    let assignment = match state.store().insert(assignment) {
        Ok(assignment) => assignment,
        Err(error) => return ApiErrorResponse::from(error).into_response(),
    };

    let propagation = state
        .propagation_engine()
        .on_source_created(&request.organization_id, &assignment);

    (
        StatusCode::CREATED,
        Json(AssignmentResponse {
            assignment,
            propagation: PropagationResponse::from(propagation),
        }),
    )
        .into_response()
}

/// Handler for `PUT /assignments/:id`.
async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAssignmentRequest>,
) -> Response {
    let Some(mut assignment) = state
        .store()
        .find_by_id(id)
        .filter(EmployeeComponentAssignment::is_live)
    else {
        return ApiErrorResponse::from(crate::error::EngineError::AssignmentNotFound { id })
            .into_response();
    };

    assignment.configuration = request.configuration;
    let assignment = match state.store().update(assignment) {
        Ok(assignment) => assignment,
        Err(error) => return ApiErrorResponse::from(error).into_response(),
    };

    let propagation = state
        .propagation_engine()
        .on_source_updated(&request.organization_id, &assignment);

    (
        StatusCode::OK,
        Json(AssignmentResponse {
            assignment,
            propagation: PropagationResponse::from(propagation),
        }),
    )
        .into_response()
}

/// Handler for `DELETE /assignments/:id`.
async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<OrganizationRequest>,
) -> Response {
    let deleted = AssignmentStore::soft_delete(
        state.store().as_ref(),
        id,
        state.clock().now(),
    );
    let assignment = match deleted {
        Ok(assignment) => assignment,
        Err(error) => return ApiErrorResponse::from(error).into_response(),
    };

    let propagation = state
        .propagation_engine()
        .on_source_deleted(&request.organization_id, &assignment);

    (
        StatusCode::OK,
        Json(AssignmentResponse {
            assignment,
            propagation: PropagationResponse::from(propagation),
        }),
    )
        .into_response()
}

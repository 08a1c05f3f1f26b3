//! HTTP request handlers for the Leave Policy Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{patch, post, put},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ValidationContext, derive_employee_balances, validate_credit_request, validate_leave_request,
};
use crate::error::EngineError;
use crate::models::{
    ConfigurationCarrier, ConfigurationPatch, LeaveBalance, LeaveConfiguration, Rejection, Verdict,
};

use super::request::{
    AssignEmployeesRequest, CopyRequest, CreditValidationRequest, DeriveBalancesRequest,
    LeaveValidationRequest, ScopeQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/configurations",
            post(create_configuration).get(list_configurations),
        )
        .route(
            "/configurations/:id",
            patch(update_configuration)
                .get(get_configuration)
                .delete(delete_configuration),
        )
        .route("/configurations/:id/employees", put(assign_employees))
        .route("/configurations/:id/copy", post(copy_configuration))
        .route("/balances/derive", post(derive_balances))
        .route("/leave-requests/validate", post(validate_leave))
        .route("/credit-requests/validate", post(validate_credit))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, turning extractor failures into API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn logged(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Handler for POST /configurations.
async fn create_configuration(
    State(state): State<AppState>,
    payload: Result<Json<ConfigurationCarrier>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create configuration request");
    let carrier = parse_body(payload, correlation_id)?;

    let created = state
        .registry()
        .write()
        .await
        .create(carrier)
        .map_err(|e| logged(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, created))
}

/// Handler for GET /configurations?scope_id=.
async fn list_configurations(
    State(state): State<AppState>,
    query: Result<Query<ScopeQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;

    let registry = state.registry().read().await;
    let configurations: Vec<&LeaveConfiguration> = registry.list_by_scope(&query.scope_id);
    Ok(json_response(StatusCode::OK, configurations))
}

/// Handler for GET /configurations/:id.
async fn get_configuration(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult {
    let registry = state.registry().read().await;
    let configuration = registry.get(id)?;
    Ok(json_response(StatusCode::OK, configuration))
}

/// Handler for PATCH /configurations/:id.
async fn update_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ConfigurationPatch>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, configuration_id = %id, "Processing update request");
    let patch = parse_body(payload, correlation_id)?;

    let updated = state
        .registry()
        .write()
        .await
        .update(id, patch)
        .map_err(|e| logged(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, updated))
}

/// Handler for PUT /configurations/:id/employees.
async fn assign_employees(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AssignEmployeesRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;

    let updated = state
        .registry()
        .write()
        .await
        .assign_employees(id, body.employee_ids)
        .map_err(|e| logged(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, updated))
}

/// Handler for POST /configurations/:id/copy.
async fn copy_configuration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CopyRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;

    let copies = state
        .registry()
        .write()
        .await
        .copy_to(id, &body.scopes)
        .map_err(|e| logged(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, copies))
}

/// Handler for DELETE /configurations/:id.
async fn delete_configuration(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    state
        .registry()
        .write()
        .await
        .delete(id)
        .map_err(|e| logged(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for POST /balances/derive.
async fn derive_balances(
    State(state): State<AppState>,
    payload: Result<Json<DeriveBalancesRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;

    let configurations: Vec<LeaveConfiguration> = {
        let registry = state.registry().read().await;
        registry
            .list_by_scope(&body.scope_id)
            .into_iter()
            .filter(|c| {
                body.employee_id
                    .as_ref()
                    .is_none_or(|employee| c.employee_ids.contains(employee))
            })
            .cloned()
            .collect()
    };

    let summary = derive_employee_balances(&configurations, &body.ledger)
        .map_err(|e| logged(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        scope_id = %body.scope_id,
        leave_types = summary.balances.len(),
        "Derived balances"
    );
    Ok(json_response(StatusCode::OK, summary))
}

fn today_or(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /leave-requests/validate.
///
/// Business outcomes (accepted or rejected) are returned with 200.
async fn validate_leave(
    State(state): State<AppState>,
    payload: Result<Json<LeaveValidationRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;
    let start_time = Instant::now();

    let configuration = {
        let registry = state.registry().read().await;
        let code = body.request.leave_type_code.trim();
        registry
            .list_by_scope(&body.scope_id)
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .cloned()
    };
    let Some(configuration) = configuration else {
        let verdict: Verdict<()> = Verdict::Rejected {
            reasons: vec![Rejection::structural(
                "leave_type_code",
                format!(
                    "leave type '{}' is not configured in scope '{}'",
                    body.request.leave_type_code, body.scope_id
                ),
            )],
        };
        return Ok(json_response(StatusCode::OK, verdict));
    };

    let balance = body
        .balance
        .clone()
        .unwrap_or_else(|| LeaveBalance::empty(configuration.category()));
    let settings = state.config().settings();
    let holidays = state.config().holidays();
    let mut ctx = ValidationContext::new(today_or(body.as_of), settings, holidays)
        .with_booked(&body.booked);
    if let Some(employee) = &body.employee {
        ctx = ctx.with_employee(employee);
    }

    let verdict = validate_leave_request(&body.request, &configuration, &balance, &ctx)
        .map_err(|e| logged(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        code = %configuration.code(),
        accepted = verdict.is_accepted(),
        rejections = verdict.reasons().len(),
        duration_us = start_time.elapsed().as_micros(),
        "Validated leave request"
    );
    Ok(json_response(StatusCode::OK, verdict))
}

/// Handler for POST /credit-requests/validate.
async fn validate_credit(
    State(state): State<AppState>,
    payload: Result<Json<CreditValidationRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;

    let configurations: Vec<LeaveConfiguration> = {
        let registry = state.registry().read().await;
        registry
            .list_by_scope(&body.scope_id)
            .into_iter()
            .cloned()
            .collect()
    };

    let ctx = ValidationContext::new(
        today_or(body.as_of),
        state.config().settings(),
        state.config().holidays(),
    );
    let verdict = validate_credit_request(&body.request, &configurations, &ctx);
    info!(
        correlation_id = %correlation_id,
        credit_type = %body.request.credit_type,
        accepted = verdict.is_accepted(),
        "Validated credit request"
    );
    Ok(json_response(StatusCode::OK, verdict))
}

//! HTTP request handlers for the employment credit API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::run_credit_calculation;
use crate::config::{ConfigLoader, PolicyParameters, SchemeMetadata};
use crate::error::EngineResult;
use crate::models::{CreditRequest, CreditResult};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/scheme", get(scheme_handler))
        .with_state(state)
}

/// Scheme metadata and the tax years with configured policies.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeSummary {
    /// Scheme metadata.
    #[serde(flatten)]
    pub scheme: SchemeMetadata,
    /// Effective tax years of the configured policies, ascending.
    pub policy_years: Vec<i32>,
}

/// Handler for GET /scheme endpoint.
async fn scheme_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config().config();
    let summary = SchemeSummary {
        scheme: config.scheme().clone(),
        policy_years: config.policies().iter().map(|p| p.effective_tax_year).collect(),
    };
    (StatusCode::OK, Json(summary))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the credit and recapture result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
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
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let credit_request: CreditRequest = match request.try_into() {
        Ok(req) => req,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request rejected"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match perform_calculation(credit_request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                company_size = %result.company_size,
                region = %result.region,
                tax_year = ?result.tax_year,
                gross_credit = result.gross_credit,
                applied_credit = result.applied_credit,
                clawback_total = result.clawback_schedule.total,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Resolves the policy for the request's tax year and runs the calculation.
///
/// A request without a tax year uses the latest configured policy, and the
/// result records which year that was.
fn perform_calculation(
    mut request: CreditRequest,
    config: &ConfigLoader,
) -> EngineResult<CreditResult> {
    let params: &PolicyParameters = match request.tax_year {
        Some(year) => config.get_policy(year)?,
        None => {
            let (year, params) = config.latest_policy();
            request.tax_year = Some(year);
            params
        }
    };
    run_credit_calculation(&request, params)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

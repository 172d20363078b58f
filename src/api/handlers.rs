//! HTTP request handlers for the VR benefit engine API.

use std::path::Path;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::EngineResult;
use crate::models::{Competency, PipelineResult};
use crate::pipeline::run_from_dir;
use crate::publish::{SqlitePublisher, TablePublisher};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Handler for POST /calculate.
///
/// Runs the pipeline for the requested competency over the configured
/// source directory and, when asked, replaces the published table.
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
                        ApiError::new("VALIDATION_ERROR", body_text)
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
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let competency = match Competency::new(request.month, request.year) {
        Ok(competency) => competency,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid competency");
            let api_error: ApiErrorResponse = err.into();
            return json_error(api_error.status, api_error.error);
        }
    };

    let store_path = match (request.publish, state.store_path()) {
        (false, _) => None,
        (true, Some(path)) => Some(path.to_path_buf()),
        (true, None) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                ApiError::new(
                    "PUBLISH_NOT_CONFIGURED",
                    "This server has no store to publish to",
                ),
            );
        }
    };

    let config = state.config_handle();
    let source_dir = state.source_dir().to_path_buf();
    let start_time = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        calculate_and_publish(&config, &source_dir, competency, store_path.as_deref())
    })
    .await;

    match outcome {
        Ok(Ok(response)) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %response.result.run_id,
                competency = %competency,
                rows = response.result.rows.len(),
                published = response.published,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_error(api_error.status, api_error.error)
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Calculation task aborted"
            );
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CALCULATION_ERROR", "Calculation task aborted"),
            )
        }
    }
}

/// Runs the pipeline and publishes its rows when `store_path` is given.
fn calculate_and_publish(
    config: &PipelineConfig,
    source_dir: &Path,
    competency: Competency,
    store_path: Option<&Path>,
) -> EngineResult<CalculationResponse> {
    let result: PipelineResult = run_from_dir(source_dir, config, competency)?;
    let published = match store_path {
        Some(path) => {
            let mut publisher = SqlitePublisher::open(path)?;
            publisher.publish(&config.publish().table_name, &result.rows)?;
            true
        }
        None => false,
    };
    Ok(CalculationResponse { published, result })
}

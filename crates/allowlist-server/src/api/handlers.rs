//! HTTP request handlers.

use super::types::{HealthResponse, MessageResponse, SubmitRequest};
use super::AppState;
use crate::error::ApiError;
use allowlist_core::{RegistrationRecord, SUBMIT_SUCCESS_MESSAGE};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        registry_count: state.service.count().await,
    })
}

/// Liveness probe kept for the web frontend.
pub async fn backend_test() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend is working!"))
}

/// Accept an allowlist submission.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    info!(
        wallet_address = %request.wallet_address.trim(),
        twitter_username = %request.twitter_username.trim(),
        "Submission received"
    );

    state
        .service
        .register(
            &request.wallet_address,
            &request.twitter_username,
            request.requirements.unwrap_or_default(),
        )
        .await?;

    Ok(Json(MessageResponse::new(SUBMIT_SUCCESS_MESSAGE)))
}

/// List every submission, newest first.
pub async fn list_submissions(State(state): State<AppState>) -> Json<Vec<RegistrationRecord>> {
    Json(state.service.list_registrations().await)
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

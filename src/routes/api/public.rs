use std::sync::Arc;

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

/// Succeeds only while the database answers.
async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    state
        .db
        .ping()
        .await
        .map_err(|err| AppError::internal_with_source("Database unavailable", err))?;
    JsonApiResponse::ok(HealthResponse { ok: true })
}

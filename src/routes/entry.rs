use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

use super::api;

/// Full application: routes plus the error envelope, panic and tracing layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::router(state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}

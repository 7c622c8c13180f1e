use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{lists, public, todos};

/// Health probe plus the list and todo resources.
pub fn router(state: Arc<AppState>) -> Router {
    [public::router, lists::router, todos::router]
        .into_iter()
        .fold(Router::new(), |app, routes| app.merge(routes(Arc::clone(&state))))
}

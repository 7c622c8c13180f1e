use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

type PanicPayload = Box<dyn Any + Send + 'static>;
type PanicHandler = fn(PanicPayload) -> Response;

/// Converts a handler panic into the JSON 500 envelope.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(payload: PanicPayload) -> Response {
    let reason = panic_reason(payload.as_ref());
    tracing::error!(panic = reason, "handler panicked");

    // Release builds never echo the panic text.
    let message = if cfg!(debug_assertions) {
        format!("Handler panicked: {reason}")
    } else {
        "Internal server error".to_string()
    };
    AppError::internal(message).into_response()
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic")
}

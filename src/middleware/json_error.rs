use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, HeaderName, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Wraps error responses that handlers did not build themselves (extractor
/// rejections, unknown routes) in the JSON envelope.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || has_json_body(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let err = error_for_status(status, error_message(status, text));
    if status.is_server_error() {
        err.log();
    }

    let mut rewritten = err.to_envelope().into_response();
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    carry_headers(parts.headers, rewritten.headers_mut());
    rewritten
}

/// Moves every header value across, repeated ones like `set-cookie` included.
fn carry_headers(from: HeaderMap, to: &mut HeaderMap) {
    let mut current: Option<HeaderName> = None;
    for (name, value) in from {
        if let Some(name) = name {
            to.remove(&name);
            current = Some(name);
        }
        if let Some(name) = &current {
            to.append(name.clone(), value);
        }
    }
}

fn has_json_body(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.starts_with("application/json") || value.contains("+json")
        })
}

fn error_message(status: StatusCode, text: String) -> String {
    if text.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        text
    }
}

fn error_for_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        status if status.is_client_error() => AppError::bad_request(message),
        _ => AppError::internal(message),
    }
}

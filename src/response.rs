use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

/// Envelope shared by every reply: `{ "status", "message", "data" }`.
#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(data: T) -> ApiResult<T> {
        Ok(Self::new(StatusCode::OK, "ok", data))
    }

    pub fn created(data: T) -> ApiResult<T> {
        Ok(Self::new(StatusCode::CREATED, "created", data))
    }
}

impl JsonApiResponse<()> {
    /// 204 with an empty body.
    pub fn deleted() -> ApiResult<()> {
        Ok(Self::new(StatusCode::NO_CONTENT, "deleted", ()))
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        match StatusCode::from_u16(self.status) {
            Ok(StatusCode::NO_CONTENT) => StatusCode::NO_CONTENT.into_response(),
            Ok(status) => (status, Json(self)).into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn to_envelope(&self) -> JsonApiResponse<Option<()>> {
        JsonApiResponse::new(self.status(), self.message(), None)
    }

    pub(crate) fn log(&self) {
        let status = self.status().as_u16();
        match self.source_error() {
            Some(source) => tracing::error!(status, error = %self, %source, "request failed"),
            None => tracing::error!(status, error = %self, "request failed"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            self.log();
        }
        self.to_envelope().into_response()
    }
}

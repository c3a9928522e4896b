//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bn_core::BnError;
use serde_json::json;

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, code: "not_found", message: msg.into() }
    }
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "bad_request", message: msg.into() }
    }
    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::PAYLOAD_TOO_LARGE, code: "payload_too_large", message: msg.into() }
    }
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, code: "unprocessable", message: msg.into() }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "internal_error", message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<BnError> for ApiError {
    fn from(err: BnError) -> Self {
        match &err {
            BnError::UnknownTool(_) | BnError::UnknownResource(_) => ApiError::not_found(err.to_string()),
            BnError::UnsupportedLanguage(_)
            | BnError::UnknownAction(_)
            | BnError::InvalidArgument(_)
            | BnError::Serialization(_) => ApiError::bad_request(err.to_string()),
            BnError::InputTooLarge { .. } => ApiError::payload_too_large(err.to_string()),
            BnError::Syntax { .. } | BnError::Format { .. } => ApiError::unprocessable(err.to_string()),
            _ if err.is_client_error() => ApiError::bad_request(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

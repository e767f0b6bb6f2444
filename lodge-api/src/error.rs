use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lodge_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    PersistenceError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PersistenceError(msg) => {
                tracing::error!("Persistence Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::Unauthenticated => AppError::AuthenticationError(message),
            CoreError::Forbidden(_) => AppError::AuthorizationError(message),
            CoreError::InvalidInput(_) => AppError::ValidationError(message),
            CoreError::PersistenceError(_) => AppError::PersistenceError(message),
        }
    }
}

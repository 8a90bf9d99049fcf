use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No active session for this user and session id")]
    NoActiveSession,

    #[error("No finished sessions for this user")]
    NoSessions,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model call failed: {0}")]
    ModelCallFailed(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::NoActiveSession => "no_active_session",
            AppError::NoSessions => "no_sessions",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::ModelCallFailed(_) => "model_call_failed",
            AppError::Timeout(_) => "timeout",
            AppError::DataInconsistency(_) => "data_inconsistency",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NoActiveSession => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NoSessions => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::ModelCallFailed(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg.clone()),
            AppError::DataInconsistency(msg) => {
                // Needs manual reconciliation; never drop this silently.
                tracing::error!(error = %msg, "Data inconsistency");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable".into())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = json!({
            "error": {
                "kind": self.kind(),
                "message": message,
                "code": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

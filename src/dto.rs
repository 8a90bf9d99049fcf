//! Request/response contract types for the thin API layer.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field-level validation via `validator` derive macros

use serde::{Deserialize, Serialize};

use crate::models::turn::Role;
use validator::Validate;

/// POST /api/turns
#[derive(Debug, Deserialize, Validate)]
pub struct AppendTurnRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "session_id must not be empty"))]
    pub session_id: String,
    pub role: Role,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    /// Raw prompt string logged alongside the turn so the exact model
    /// context can be rebuilt later.
    #[validate(length(min = 1, message = "prompt_text must not be empty"))]
    pub prompt_text: String,
}

/// POST /api/sessions/end
#[derive(Debug, Deserialize, Validate)]
pub struct EndSessionRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "session_id must not be empty"))]
    pub session_id: String,
}

/// GET /api/sessions/:session_id/transcript
#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    pub user_id: String,
}

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// DELETE /api/users/:user_id
#[derive(Debug, Serialize)]
pub struct DeleteUserDataResponse {
    pub deleted_summaries: u64,
    pub deleted_transcripts: u64,
}

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::dto::{AppendTurnRequest, EndSessionRequest, MessageResponse, TranscriptQuery};
use crate::error::{AppError, AppResult};
use crate::models::summary::SummaryRecord;
use crate::models::turn::Turn;
use crate::services::session;
use crate::store;
use crate::AppState;

pub async fn append_turn(
    State(state): State<AppState>,
    Json(body): Json<AppendTurnRequest>,
) -> AppResult<Json<MessageResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let turn = Turn::new(body.role, body.content);
    store::transcripts::append_turn(
        &state.db,
        &body.user_id,
        &body.session_id,
        &turn,
        &body.prompt_text,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "turn appended".into(),
    }))
}

pub async fn end_session(
    State(state): State<AppState>,
    Json(body): Json<EndSessionRequest>,
) -> AppResult<Json<SummaryRecord>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record =
        session::end_session(&state.db, &state.model, &body.user_id, &body.session_id).await?;

    Ok(Json(record))
}

/// Chat log of a finished session, preserved on its SummaryRecord.
pub async fn session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<TranscriptQuery>,
) -> AppResult<Json<Vec<Turn>>> {
    let chatlog = session::session_transcript(&state.db, &query.user_id, &session_id).await?;
    Ok(Json(chatlog))
}

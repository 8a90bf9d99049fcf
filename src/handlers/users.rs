use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::DeleteUserDataResponse;
use crate::error::AppResult;
use crate::store;
use crate::AppState;

/// Bulk-deletes everything a user owns: all SummaryRecords plus any residual
/// transcript of a never-ended session. Idempotent; deleting an unknown user
/// reports zero rows.
pub async fn delete_user_data(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DeleteUserDataResponse>> {
    let deleted_summaries = store::summaries::delete_all_for_user(&state.db, &user_id).await?;
    let deleted_transcripts = store::transcripts::delete_all_for_user(&state.db, &user_id).await?;

    tracing::info!(
        user_id = %user_id,
        deleted_summaries,
        deleted_transcripts,
        "Deleted all stored data for user"
    );

    Ok(Json(DeleteUserDataResponse {
        deleted_summaries,
        deleted_transcripts,
    }))
}

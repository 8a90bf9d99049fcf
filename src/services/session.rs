//! Session finalizer: turns a live transcript into a durable SummaryRecord
//! and retires the transcript. The summary write must be confirmed before
//! the transcript is deleted; the reverse order would lose data.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::summary::SummaryRecord;
use crate::models::turn::Turn;
use crate::mood;
use crate::sentiment::{self, SentimentScore};
use crate::services::model::ModelClient;
use crate::services::summarize;
use crate::store;
use crate::store::summaries::NewSummary;

pub async fn end_session(
    db: &PgPool,
    model: &ModelClient,
    user_id: &str,
    session_id: &str,
) -> AppResult<SummaryRecord> {
    let transcript = store::transcripts::read_transcript(db, user_id, session_id)
        .await?
        .ok_or(AppError::NoActiveSession)?;

    // A prior finalize may have persisted the summary and then failed the
    // cleanup step. Reuse the stored record and finish the cleanup rather
    // than paying for a second pair of completion calls.
    if let Some(existing) = store::summaries::find_for_session(db, user_id, session_id).await? {
        tracing::info!(user_id, session_id, "Reusing existing summary from interrupted finalize");
        retire_transcript(db, user_id, session_id).await?;
        return Ok(existing);
    }

    let score = match sentiment::score_transcript(&transcript) {
        Some(score) => score,
        None => {
            // Assistant-only transcripts carry no user text to score; they
            // finalize at the neutral midpoint.
            tracing::debug!(user_id, session_id, "No user turns to score, defaulting to neutral");
            SentimentScore::NEUTRAL
        }
    };

    let summaries = summarize::summarize(model, &transcript.chatlog).await?;
    let mood_percentage = mood::to_mood_percentage(score);

    let record = store::summaries::insert(
        db,
        &NewSummary {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            short_summary: summaries.short,
            long_summary: summaries.long,
            mood_percentage,
            chatlog: transcript.chatlog,
        },
    )
    .await?;

    retire_transcript(db, user_id, session_id).await?;

    tracing::info!(user_id, session_id, mood_percentage, "Session finalized");
    Ok(record)
}

/// Deletes the live transcript after the summary write is confirmed. A
/// failure here leaves both artifacts in place and is surfaced for
/// reconciliation; a retried `end_session` reconverges via the
/// existing-summary guard above.
async fn retire_transcript(db: &PgPool, user_id: &str, session_id: &str) -> AppResult<()> {
    if let Err(e) = store::transcripts::delete_transcript(db, user_id, session_id).await {
        tracing::error!(
            user_id,
            session_id,
            error = %e,
            "Summary persisted but transcript delete failed"
        );
        return Err(AppError::DataInconsistency(format!(
            "summary persisted but transcript delete failed for session {session_id}"
        )));
    }
    Ok(())
}

/// Chat log of an already-finalized session, read back from its
/// SummaryRecord.
pub async fn session_transcript(
    db: &PgPool,
    user_id: &str,
    session_id: &str,
) -> AppResult<Vec<Turn>> {
    let record = store::summaries::find_for_session(db, user_id, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No summary for this session".into()))?;
    Ok(record.chatlog)
}

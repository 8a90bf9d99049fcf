//! Transcript Store Adapter: append/read/delete over the live per-session
//! transcript rows. Appends are a single atomic upsert, so two concurrent
//! appends to the same `(user_id, session_id)` both land — there is no
//! read-then-write window to lose one.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::transcript::Transcript;
use crate::models::turn::Turn;
use crate::store::retry::with_backoff;

#[derive(sqlx::FromRow)]
struct TranscriptRow {
    user_id: String,
    session_id: String,
    chatlog: Json<Vec<Turn>>,
    prompt_log: Json<Vec<String>>,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TranscriptRow> for Transcript {
    fn from(row: TranscriptRow) -> Self {
        Transcript {
            user_id: row.user_id,
            session_id: row.session_id,
            chatlog: row.chatlog.0,
            prompt_log: row.prompt_log.0,
            started_at: row.started_at,
            updated_at: row.updated_at,
        }
    }
}

/// Appends one turn and its raw prompt string to the session's transcript,
/// creating the transcript on the first turn. Both JSONB sequences are
/// extended in the same statement, keeping them in lock-step.
pub async fn append_turn(
    db: &PgPool,
    user_id: &str,
    session_id: &str,
    turn: &Turn,
    prompt_text: &str,
) -> AppResult<()> {
    with_backoff(|| {
        let db = db.clone();
        let turn = turn.clone();
        let (user_id, session_id, prompt) = (
            user_id.to_string(),
            session_id.to_string(),
            prompt_text.to_string(),
        );
        async move {
            sqlx::query(
                r#"
                INSERT INTO transcripts (user_id, session_id, chatlog, prompt_log)
                VALUES ($1, $2, jsonb_build_array($3::jsonb), jsonb_build_array(to_jsonb($4::text)))
                ON CONFLICT (user_id, session_id) DO UPDATE SET
                    chatlog = transcripts.chatlog || EXCLUDED.chatlog,
                    prompt_log = transcripts.prompt_log || EXCLUDED.prompt_log,
                    updated_at = NOW()
                "#,
            )
            .bind(&user_id)
            .bind(&session_id)
            .bind(Json(&turn))
            .bind(&prompt)
            .execute(&db)
            .await
            .map(|_| ())
        }
    })
    .await?;

    Ok(())
}

/// `None` means no turn has ever been appended for this key.
pub async fn read_transcript(
    db: &PgPool,
    user_id: &str,
    session_id: &str,
) -> AppResult<Option<Transcript>> {
    let row = with_backoff(|| {
        let db = db.clone();
        let (user_id, session_id) = (user_id.to_string(), session_id.to_string());
        async move {
            sqlx::query_as::<_, TranscriptRow>(
                r#"
                SELECT user_id, session_id, chatlog, prompt_log, started_at, updated_at
                FROM transcripts
                WHERE user_id = $1 AND session_id = $2
                "#,
            )
            .bind(&user_id)
            .bind(&session_id)
            .fetch_optional(&db)
            .await
        }
    })
    .await?;

    Ok(row.map(Transcript::from))
}

/// Idempotent: deleting a transcript that does not exist is a no-op.
pub async fn delete_transcript(db: &PgPool, user_id: &str, session_id: &str) -> AppResult<()> {
    with_backoff(|| {
        let db = db.clone();
        let (user_id, session_id) = (user_id.to_string(), session_id.to_string());
        async move {
            sqlx::query("DELETE FROM transcripts WHERE user_id = $1 AND session_id = $2")
                .bind(&user_id)
                .bind(&session_id)
                .execute(&db)
                .await
                .map(|_| ())
        }
    })
    .await?;

    Ok(())
}

/// Removes any residual transcripts left behind for a user, e.g. sessions
/// that were never ended. Part of account deletion.
pub async fn delete_all_for_user(db: &PgPool, user_id: &str) -> AppResult<u64> {
    let deleted = with_backoff(|| {
        let db = db.clone();
        let user_id = user_id.to_string();
        async move {
            sqlx::query("DELETE FROM transcripts WHERE user_id = $1")
                .bind(&user_id)
                .execute(&db)
                .await
                .map(|r| r.rows_affected())
        }
    })
    .await?;

    Ok(deleted)
}

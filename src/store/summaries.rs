//! Durable SummaryRecord persistence: insert-once at finalize time, ordered
//! reads for the dashboard, and bulk delete on account removal.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::summary::SummaryRecord;
use crate::models::turn::Turn;
use crate::store::retry::with_backoff;

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    user_id: String,
    session_id: String,
    short_summary: String,
    long_summary: String,
    mood_percentage: i32,
    chatlog: Json<Vec<Turn>>,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for SummaryRecord {
    fn from(row: SummaryRow) -> Self {
        SummaryRecord {
            id: row.id,
            user_id: row.user_id,
            session_id: row.session_id,
            short_summary: row.short_summary,
            long_summary: row.long_summary,
            mood_percentage: row.mood_percentage,
            chatlog: row.chatlog.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewSummary {
    pub user_id: String,
    pub session_id: String,
    pub short_summary: String,
    pub long_summary: String,
    pub mood_percentage: i32,
    pub chatlog: Vec<Turn>,
}

/// Persists the finalize artifact. Idempotent on the `(user_id, session_id)`
/// unique key: a concurrent or retried finalize gets the already-stored
/// record back instead of a duplicate.
pub async fn insert(db: &PgPool, summary: &NewSummary) -> AppResult<SummaryRecord> {
    let row = with_backoff(|| {
        let db = db.clone();
        let summary = summary.clone();
        async move {
            sqlx::query_as::<_, SummaryRow>(
                r#"
                INSERT INTO summaries (id, user_id, session_id, short_summary, long_summary, mood_percentage, chatlog)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (user_id, session_id) DO UPDATE
                    SET short_summary = summaries.short_summary  -- no-op update to trigger RETURNING
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&summary.user_id)
            .bind(&summary.session_id)
            .bind(&summary.short_summary)
            .bind(&summary.long_summary)
            .bind(summary.mood_percentage)
            .bind(Json(&summary.chatlog))
            .fetch_one(&db)
            .await
        }
    })
    .await?;

    Ok(row.into())
}

pub async fn find_for_session(
    db: &PgPool,
    user_id: &str,
    session_id: &str,
) -> AppResult<Option<SummaryRecord>> {
    let row = with_backoff(|| {
        let db = db.clone();
        let (user_id, session_id) = (user_id.to_string(), session_id.to_string());
        async move {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT * FROM summaries WHERE user_id = $1 AND session_id = $2",
            )
            .bind(&user_id)
            .bind(&session_id)
            .fetch_optional(&db)
            .await
        }
    })
    .await?;

    Ok(row.map(SummaryRecord::from))
}

/// All of a user's finalized sessions, most recent first.
pub async fn list_for_user(db: &PgPool, user_id: &str) -> AppResult<Vec<SummaryRecord>> {
    let rows = with_backoff(|| {
        let db = db.clone();
        let user_id = user_id.to_string();
        async move {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT * FROM summaries WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(&user_id)
            .fetch_all(&db)
            .await
        }
    })
    .await?;

    Ok(rows.into_iter().map(SummaryRecord::from).collect())
}

/// Finalized sessions within `[start, end)`, most recent first. A record at
/// exactly `start` is included; one at exactly `end` is not.
pub async fn list_for_range(
    db: &PgPool,
    user_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<SummaryRecord>> {
    let rows = with_backoff(|| {
        let db = db.clone();
        let user_id = user_id.to_string();
        async move {
            sqlx::query_as::<_, SummaryRow>(
                r#"
                SELECT * FROM summaries
                WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
                ORDER BY created_at DESC
                "#,
            )
            .bind(&user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&db)
            .await
        }
    })
    .await?;

    Ok(rows.into_iter().map(SummaryRecord::from).collect())
}

/// Idempotent bulk delete of every SummaryRecord a user owns.
pub async fn delete_all_for_user(db: &PgPool, user_id: &str) -> AppResult<u64> {
    let deleted = with_backoff(|| {
        let db = db.clone();
        let user_id = user_id.to_string();
        async move {
            sqlx::query("DELETE FROM summaries WHERE user_id = $1")
                .bind(&user_id)
                .execute(&db)
                .await
                .map(|r| r.rows_affected())
        }
    })
    .await?;

    Ok(deleted)
}

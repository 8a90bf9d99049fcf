//! Dashboard aggregation over a user's finalized sessions: overall mood
//! average plus the swing between the two most recent sessions.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::summary::SummaryRecord;
use crate::store;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Most recent first.
    pub sessions: Vec<SummaryRecord>,
    pub total_sessions: usize,
    /// Mean mood percentage across all finalized sessions.
    pub overall_mood: f64,
    /// Most recent mood minus the one before it; the raw most recent value
    /// when there is only one session.
    pub mood_delta: i32,
}

#[derive(Debug, Serialize)]
pub struct MonthlySessions {
    pub sessions: Vec<SummaryRecord>,
    pub total_sessions: usize,
}

pub async fn get_dashboard(db: &PgPool, user_id: &str) -> AppResult<DashboardView> {
    let records = store::summaries::list_for_user(db, user_id).await?;
    build_view(records).ok_or(AppError::NoSessions)
}

/// Sessions finalized within the current calendar month. An empty month is a
/// valid result, not an error.
pub async fn get_monthly_sessions(db: &PgPool, user_id: &str) -> AppResult<MonthlySessions> {
    let (start, end) = current_month_bounds(Utc::now());
    let sessions = store::summaries::list_for_range(db, user_id, start, end).await?;
    Ok(MonthlySessions {
        total_sessions: sessions.len(),
        sessions,
    })
}

fn build_view(records: Vec<SummaryRecord>) -> Option<DashboardView> {
    let mood_delta = match records.as_slice() {
        [] => return None,
        [only] => only.mood_percentage,
        [latest, previous, ..] => latest.mood_percentage - previous.mood_percentage,
    };

    let total: i64 = records.iter().map(|r| i64::from(r.mood_percentage)).sum();
    let overall_mood = total as f64 / records.len() as f64;

    Some(DashboardView {
        total_sessions: records.len(),
        overall_mood,
        mood_delta,
        sessions: records,
    })
}

/// `[first instant of this month, first instant of next month)` in UTC.
fn current_month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let first = today.with_day(1).expect("day 1 exists in every month");
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("first of month is a valid date");

    (
        first.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc(),
        next.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::turn::{Role, Turn};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record(mood: i32) -> SummaryRecord {
        SummaryRecord {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            session_id: Uuid::new_v4().to_string(),
            short_summary: "Checking in".into(),
            long_summary: "- felt ok".into(),
            mood_percentage: mood,
            chatlog: vec![Turn::new(Role::User, "hi")],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_mean_and_delta_over_three_sessions() {
        // Most recent first: 6, 8, 10
        let view = build_view(vec![record(6), record(8), record(10)]).unwrap();
        assert_eq!(view.total_sessions, 3);
        assert_eq!(view.overall_mood, 8.0);
        assert_eq!(view.mood_delta, -2);
    }

    #[test]
    fn test_single_session_delta_is_raw_value() {
        let view = build_view(vec![record(7)]).unwrap();
        assert_eq!(view.total_sessions, 1);
        assert_eq!(view.overall_mood, 7.0);
        assert_eq!(view.mood_delta, 7);
    }

    #[test]
    fn test_no_sessions_yields_none() {
        assert!(build_view(vec![]).is_none());
    }

    #[test]
    fn test_month_bounds_mid_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 13, 45, 0).unwrap();
        let (start, end) = current_month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_bounds_december_rolls_into_next_year() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = current_month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_first_instant_of_month_is_inside_bounds() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap();
        let (start, end) = current_month_bounds(now);
        // Half-open window: a record stamped exactly at `start` belongs to
        // this month, one stamped exactly at `end` does not.
        assert!(start < end);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }
}

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::dashboard::{self, DashboardView, MonthlySessions};
use crate::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DashboardView>> {
    let view = dashboard::get_dashboard(&state.db, &user_id).await?;
    Ok(Json(view))
}

pub async fn monthly_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<MonthlySessions>> {
    let sessions = dashboard::get_monthly_sessions(&state.db, &user_id).await?;
    Ok(Json(sessions))
}

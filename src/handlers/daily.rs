use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;

use super::quiz::{start_session, StartQuizResponse};
use crate::extractors::AuthGuard;
use crate::rejections::{AppError, ResultExt};
use crate::services::game::{DailyStartOutcome, GameService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/daily/start", post(start_daily))
}

/// Begin the one-question daily session. A user gets a single attempt per
/// calendar day; a repeat request changes nothing and tells them to come
/// back tomorrow.
async fn start_daily(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<StartQuizResponse>, AppError> {
    let today = Utc::now().date_naive();
    let outcome = GameService::new(state.db.clone())
        .daily_start(user.id, today)
        .await
        .reject("could not check daily attempt")?;

    if let DailyStartOutcome::AlreadyAttempted = outcome {
        return Err(AppError::AlreadyAttempted);
    }

    // any category, difficulty, and type
    start_session(&state, user.id, 1, None, None, None).await
}

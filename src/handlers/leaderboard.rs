use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::extractors::AuthGuard;
use crate::models::ScoreField;
use crate::rejections::{AppError, ResultExt};
use crate::services::game::UnlockedAchievement;
use crate::services::leaderboard::LeaderboardService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/leaderboard/{field}", get(leaderboard))
}

#[derive(Serialize)]
struct LeaderboardEntry {
    rank: usize,
    user_id: i64,
    display_name: String,
    avatar: String,
    score: i64,
}

#[derive(Serialize)]
struct LeaderboardResponse {
    field: ScoreField,
    entries: Vec<LeaderboardEntry>,
    your_rank: usize,
    unlocked: Vec<UnlockedAchievement>,
}

async fn leaderboard(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let field: ScoreField = field
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("unknown leaderboard: {field}")))?;

    let view = LeaderboardService::new(state.db.clone())
        .view(user.id, field, Utc::now())
        .await
        .reject("could not load leaderboard")?
        .ok_or(AppError::NotFound("user rank"))?;

    let entries = view
        .entries
        .into_iter()
        .enumerate()
        .map(|(idx, p)| LeaderboardEntry {
            rank: idx + 1,
            user_id: p.id,
            display_name: p.display_name,
            avatar: p.avatar,
            score: match field {
                ScoreField::AllTime => p.all_time_score,
                ScoreField::Weekly => p.weekly_score,
                ScoreField::Monthly => p.monthly_score,
            },
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        field,
        entries,
        your_rank: view.rank,
        unlocked: view.unlocked,
    }))
}

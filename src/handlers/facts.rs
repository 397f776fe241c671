use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::models::SavedFactRow;
use crate::extractors::AuthGuard;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fact/random", get(random_fact))
        .route("/fact/save", post(save_fact))
        .route("/facts", get(saved_facts))
}

#[derive(Serialize)]
struct FactView {
    fact_number: i64,
    fact: String,
}

async fn random_fact(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<FactView>, AppError> {
    let fact = state.facts.random_fact().await.map_err(|e| {
        tracing::warn!("fact fetch failed: {e}");
        AppError::RemoteUnavailable("Sorry, no fact is available right now.".to_owned())
    })?;

    let fact_number = state
        .db
        .next_fact_number(user.id)
        .await
        .reject("could not number the fact")?;

    Ok(Json(FactView { fact_number, fact }))
}

#[derive(Deserialize)]
pub struct SaveFactBody {
    pub fact_number: i64,
    pub fact: String,
}

async fn save_fact(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<SaveFactBody>,
) -> Result<Json<SavedFactRow>, AppError> {
    if body.fact.trim().is_empty() {
        return Err(AppError::InvalidInput("cannot save an empty fact".into()));
    }

    let saved_date = Utc::now().format("%d %b %Y").to_string();
    state
        .db
        .append_saved_fact(user.id, body.fact_number, &body.fact, &saved_date)
        .await
        .reject("could not save fact")?;

    Ok(Json(SavedFactRow {
        fact_number: body.fact_number,
        fact_text: body.fact,
        saved_date,
    }))
}

async fn saved_facts(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedFactRow>>, AppError> {
    let facts = state
        .db
        .saved_facts(user.id)
        .await
        .reject("could not load saved facts")?;

    Ok(Json(facts))
}

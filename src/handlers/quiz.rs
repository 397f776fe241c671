use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::db::Db;
use crate::extractors::AuthGuard;
use crate::game::{QuestionResult, QuizSession};
use crate::models::{Difficulty, Question, QuestionType};
use crate::names;
use crate::play::{self, ActiveSession};
use crate::rejections::{AppError, ResultExt};
use crate::services::game::{GameService, QuizSummary};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/quiz/start", post(start_quiz))
        .route("/quiz/{token}/answer", post(answer))
        .route("/quiz/{token}", delete(abandon))
}

#[derive(Serialize)]
struct CategoryView {
    id: u32,
    name: &'static str,
}

async fn categories() -> Json<Vec<CategoryView>> {
    Json(
        names::CATEGORIES
            .iter()
            .map(|&(id, name)| CategoryView { id, name })
            .collect(),
    )
}

#[derive(Deserialize, Default)]
pub struct StartQuizBody {
    pub amount: Option<u32>,
    pub category: Option<u32>,
    pub difficulty: Option<String>,
    #[serde(rename = "type")]
    pub qtype: Option<String>,
}

/// The question as shown to the player: options shuffled, no answer key.
#[derive(Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    pub text: String,
    pub options: Vec<String>,
    pub time_limit_secs: u32,
}

impl QuestionView {
    fn present(question: &Question, index: usize, total: usize) -> Self {
        let mut options: Vec<String> = Vec::with_capacity(question.incorrect_answers.len() + 1);
        options.push(question.correct_answer.clone());
        options.extend(question.incorrect_answers.iter().cloned());
        options.shuffle(&mut rand::thread_rng());

        Self {
            index,
            total,
            category: question.category.clone(),
            difficulty: question.difficulty,
            qtype: question.qtype,
            text: question.text.clone(),
            options,
            time_limit_secs: names::QUESTION_TIME_LIMIT_SECS,
        }
    }
}

#[derive(Serialize)]
pub struct StartQuizResponse {
    pub token: String,
    pub question: QuestionView,
}

async fn start_quiz(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<StartQuizBody>,
) -> Result<Json<StartQuizResponse>, AppError> {
    let profile = state
        .db
        .get_profile(user.id)
        .await
        .reject("could not load profile")?
        .ok_or(AppError::NotFound("profile"))?;

    let amount = body
        .amount
        .unwrap_or(profile.preferred_question_count.max(0) as u32)
        .clamp(names::MIN_QUESTION_COUNT, names::MAX_QUESTION_COUNT);

    // explicit request wins, then the stored preference; "any" means no filter
    let difficulty = match body.difficulty.as_deref() {
        Some(d) if !names::DIFFICULTIES.contains(&d) => {
            return Err(AppError::InvalidInput(format!("unknown difficulty: {d}")));
        }
        Some("any") | None => match profile.preferred_difficulty.as_str() {
            "any" => None,
            preferred => Some(preferred.to_string()),
        },
        Some(d) => Some(d.to_string()),
    };

    let qtype = match body.qtype.as_deref() {
        Some(t) if t != "multiple" && t != "boolean" => {
            return Err(AppError::InvalidInput(format!("unknown question type: {t}")));
        }
        other => other.map(str::to_string),
    };

    if let Some(category) = body.category {
        if !names::is_known_category(category) {
            return Err(AppError::InvalidInput(format!("unknown category: {category}")));
        }
    }

    start_session(&state, user.id, amount, body.category, difficulty, qtype).await
}

/// Fetch questions and register a fresh in-memory run. Shared with the
/// daily-question flow.
pub(super) async fn start_session(
    state: &AppState,
    user_id: i64,
    amount: u32,
    category: Option<u32>,
    difficulty: Option<String>,
    qtype: Option<String>,
) -> Result<Json<StartQuizResponse>, AppError> {
    let questions = state
        .trivia
        .fetch_questions(amount, category, difficulty.as_deref(), qtype.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!("question fetch failed: {e}");
            AppError::RemoteUnavailable(format!(
                "Sorry, we don't have {amount} questions available for this topic right now."
            ))
        })?;

    let engine = QuizSession::start(questions).reject("could not start session")?;
    let total = engine.total_questions();
    let first = QuestionView::present(
        engine.current_question().ok_or(AppError::Internal("empty session"))?,
        0,
        total,
    );

    let token = play::new_token();
    let session = ActiveSession::new(user_id, engine);
    {
        let mut sessions = state.sessions.lock().expect("session map poisoned");
        play::prune_stale(&mut sessions);
        sessions.insert(token.clone(), session);
    }

    tracing::info!("quiz session started for user_id={user_id}: {total} questions");

    Ok(Json(StartQuizResponse {
        token,
        question: first,
    }))
}

#[derive(Deserialize)]
pub struct AnswerBody {
    /// Which question this answer is for; a stale index is ignored
    /// instead of answering the next question.
    pub index: usize,
    pub selected: Option<String>,
}

#[derive(Serialize)]
pub struct AnswerOutcome {
    pub score: u32,
    pub correct_answer: String,
    pub time_taken_secs: u32,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    /// Absent when the answer was a duplicate and ignored.
    pub result: Option<AnswerOutcome>,
    pub next: Option<QuestionView>,
    pub summary: Option<QuizSummary>,
}

async fn answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<AnswerBody>,
) -> Result<Json<AnswerResponse>, AppError> {
    // All engine mutation happens under the lock, synchronously; the
    // database work below runs only after the lock is released.
    let step = {
        let mut sessions = state.sessions.lock().expect("session map poisoned");
        let session = sessions
            .get_mut(&token)
            .filter(|s| s.user_id == user.id)
            .ok_or(AppError::NotFound("quiz session"))?;

        if body.index != session.engine.current_index() {
            // duplicate tap / replayed request
            let next = session
                .engine
                .current_question()
                .map(|q| QuestionView::present(q, session.engine.current_index(), session.engine.total_questions()));
            return Ok(Json(AnswerResponse {
                result: None,
                next,
                summary: None,
            }));
        }

        let remaining = session.time_remaining_secs(Instant::now());
        let correct_answer = session
            .engine
            .current_question()
            .ok_or(AppError::Internal("session already finished"))?
            .correct_answer
            .clone();

        // the countdown hitting zero forces a no-answer result
        let recorded = if remaining == 0 {
            session.engine.record_answer(None, 0)
        } else {
            session.engine.record_answer(body.selected.as_deref(), remaining)
        };

        let result = recorded.map(|r| AnswerOutcome {
            score: r.score,
            correct_answer,
            time_taken_secs: r.time_taken_secs,
        });

        let terminal = session.engine.advance().reject("could not advance session")?;

        if terminal {
            let session = sessions.remove(&token).expect("session vanished under lock");
            Step::Finished {
                result,
                results: session.engine.results().to_vec(),
            }
        } else {
            session.restart_clock();
            let view = session
                .engine
                .current_question()
                .map(|q| QuestionView::present(q, session.engine.current_index(), session.engine.total_questions()));
            Step::Next { result, view }
        }
    };

    match step {
        Step::Next { result, view } => Ok(Json(AnswerResponse {
            result,
            next: view,
            summary: None,
        })),
        Step::Finished { result, results } => {
            let summary = finish(&state.db, user.id, &results).await?;
            Ok(Json(AnswerResponse {
                result,
                next: None,
                summary: Some(summary),
            }))
        }
    }
}

enum Step {
    Next {
        result: Option<AnswerOutcome>,
        view: Option<QuestionView>,
    },
    Finished {
        result: Option<AnswerOutcome>,
        results: Vec<QuestionResult>,
    },
}

async fn finish(db: &Db, user_id: i64, results: &[QuestionResult]) -> Result<QuizSummary, AppError> {
    let now = Utc::now();
    GameService::new(db.clone())
        .complete_quiz(user_id, results, now.date_naive(), now)
        .await
        .reject("could not record quiz results")
}

async fn abandon(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<(), AppError> {
    let removed = {
        let mut sessions = state.sessions.lock().expect("session map poisoned");
        let owns = sessions
            .get(&token)
            .is_some_and(|s| s.user_id == user.id);
        owns && sessions.remove(&token).is_some()
    };

    if removed {
        tracing::info!("quiz session abandoned by user_id={}", user.id);
        Ok(())
    } else {
        Err(AppError::NotFound("quiz session"))
    }
}

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::models::{PreferencesUpdate, ProfileModel};
use crate::extractors::AuthGuard;
use crate::game::Achievement;
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::utils;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/preferences", put(update_preferences))
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    pub avatar: Option<String>,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.display_name.trim().is_empty() {
        return Err(AppError::InvalidInput("display name must not be empty".into()));
    }

    let avatar = body.avatar.as_deref().unwrap_or(names::DEFAULT_AVATAR);
    if !names::AVATARS.contains(&avatar) {
        return Err(AppError::InvalidInput(format!("unknown avatar: {avatar}")));
    }

    let join_date = Utc::now().date_naive().to_string();
    let user_id = state
        .db
        .create_profile(body.display_name.trim(), &body.email, avatar, &join_date)
        .await
        .reject("could not create profile")?;

    let session_token = state
        .db
        .create_user_session(user_id)
        .await
        .reject("could not create session")?;

    let profile = state
        .db
        .get_profile(user_id)
        .await
        .reject("could not load profile")?
        .ok_or(AppError::Internal("profile missing after registration"))?;

    let cookie = utils::cookie(
        names::USER_SESSION_COOKIE_NAME,
        &session_token,
        state.secure_cookies,
    );
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie.parse().unwrap());

    Ok((headers, Json(profile)))
}

async fn logout(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let jar = axum_extra::extract::CookieJar::from_headers(&headers);
    if let Some(session) = jar.get(names::USER_SESSION_COOKIE_NAME) {
        state
            .db
            .delete_user_session(session.value())
            .await
            .reject("could not delete session")?;
    }

    let cleared = format!(
        "{}=; HttpOnly; Max-Age=0; Path=/; SameSite=Strict",
        names::USER_SESSION_COOKIE_NAME
    );
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cleared.parse().unwrap());

    Ok(headers)
}

/// Catalog entry with the user's unlock state folded in. Locked
/// achievements have no per-user record at all.
#[derive(Serialize)]
struct AchievementView {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    unlocked: bool,
    unlocked_at: Option<String>,
}

#[derive(Serialize)]
struct ProfileResponse {
    #[serde(flatten)]
    profile: ProfileModel,
    achievements: Vec<AchievementView>,
}

async fn profile(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .db
        .get_profile(user.id)
        .await
        .reject("could not load profile")?
        .ok_or(AppError::NotFound("profile"))?;

    let rows = state
        .db
        .achievements_for_user(user.id)
        .await
        .reject("could not load achievements")?;

    let achievements = Achievement::ALL
        .into_iter()
        .map(|a| {
            let row = rows
                .iter()
                .find(|r| r.achievement_id == a.id() && r.unlocked);
            AchievementView {
                id: a.id(),
                title: a.title(),
                description: a.description(),
                icon: a.icon(),
                unlocked: row.is_some(),
                unlocked_at: row.and_then(|r| r.unlocked_at.clone()),
            }
        })
        .collect();

    Ok(Json(ProfileResponse {
        profile,
        achievements,
    }))
}

#[derive(Deserialize)]
pub struct PreferencesBody {
    pub difficulty: Option<String>,
    pub question_count: Option<i64>,
    pub notification_hour: Option<i64>,
    pub avatar: Option<String>,
}

async fn update_preferences(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<PreferencesBody>,
) -> Result<Json<ProfileModel>, AppError> {
    if let Some(difficulty) = body.difficulty.as_deref() {
        if !names::DIFFICULTIES.contains(&difficulty) {
            return Err(AppError::InvalidInput(format!(
                "unknown difficulty: {difficulty}"
            )));
        }
    }
    if let Some(count) = body.question_count {
        if !(i64::from(names::MIN_QUESTION_COUNT)..=i64::from(names::MAX_QUESTION_COUNT))
            .contains(&count)
        {
            return Err(AppError::InvalidInput(format!(
                "question count must be between {} and {}",
                names::MIN_QUESTION_COUNT,
                names::MAX_QUESTION_COUNT
            )));
        }
    }
    if let Some(hour) = body.notification_hour {
        if !names::NOTIFICATION_HOURS.contains(&hour) {
            return Err(AppError::InvalidInput(format!(
                "unsupported notification hour: {hour}"
            )));
        }
    }
    if let Some(avatar) = body.avatar.as_deref() {
        if !names::AVATARS.contains(&avatar) {
            return Err(AppError::InvalidInput(format!("unknown avatar: {avatar}")));
        }
    }

    let update = PreferencesUpdate {
        preferred_difficulty: body.difficulty,
        preferred_question_count: body.question_count,
        notification_hour: body.notification_hour,
        avatar: body.avatar,
    };

    state
        .db
        .update_preferences(user.id, &update)
        .await
        .reject("could not update preferences")?;

    let profile = state
        .db
        .get_profile(user.id)
        .await
        .reject("could not load profile")?
        .ok_or(AppError::NotFound("profile"))?;

    Ok(Json(profile))
}

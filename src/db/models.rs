// Database model structs

use serde::{Deserialize, Serialize};

/// A user profile row. Mutated only through merge-style partial updates;
/// the full row is written once, at registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileModel {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub avatar: String,
    pub join_date: String,
    pub all_time_score: i64,
    pub weekly_score: i64,
    pub monthly_score: i64,
    pub last_game_score: i64,
    pub preferred_difficulty: String,
    pub preferred_question_count: i64,
    pub notification_hour: i64,
    pub daily_streak: i64,
    pub last_attempt_date: Option<String>,
    pub fact_counter: i64,
}

/// Minimal identity carried by the auth guard.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AchievementRow {
    pub achievement_id: String,
    pub unlocked: bool,
    pub unlocked_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SavedFactRow {
    pub fact_number: i64,
    pub fact_text: String,
    pub saved_date: String,
}

/// The singleton score-reset bookkeeping row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetStateModel {
    pub last_weekly_reset: Option<String>,
    pub last_monthly_reset: Option<String>,
}

/// Partial preferences update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesUpdate {
    pub preferred_difficulty: Option<String>,
    pub preferred_question_count: Option<i64>,
    pub notification_hour: Option<i64>,
    pub avatar: Option<String>,
}

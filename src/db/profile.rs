use color_eyre::{eyre::OptionExt, Result};
use libsql::params;
use ulid::Ulid;

use super::helpers::query_optional;
use super::models::{AuthUser, PreferencesUpdate, ProfileModel};
use super::Db;

pub(super) const PROFILE_COLUMNS: &str = "id, display_name, email, avatar, join_date, \
     all_time_score, weekly_score, monthly_score, last_game_score, \
     preferred_difficulty, preferred_question_count, notification_hour, \
     daily_streak, last_attempt_date, fact_counter";

impl Db {
    /// Insert a fresh profile with default scores and preferences.
    /// The only full-row write a profile ever sees.
    pub async fn create_profile(
        &self,
        display_name: &str,
        email: &str,
        avatar: &str,
        join_date: &str,
    ) -> Result<i64> {
        let conn = self.connect()?;

        let user_id = conn
            .query(
                "INSERT INTO users (display_name, email, avatar, join_date) VALUES (?, ?, ?, ?) RETURNING id",
                params![display_name, email, avatar, join_date],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get user id")?
            .get::<i64>(0)?;

        tracing::info!("new profile created: id={user_id}, name={display_name}");
        Ok(user_id)
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<Option<ProfileModel>> {
        let conn = self.connect()?;
        query_optional(
            &conn,
            &format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?"),
            params![user_id],
        )
        .await
    }

    /// Add a finished game's points to the three running scores and
    /// overwrite the last-game score. Touches only the four score columns.
    pub async fn add_game_score(&self, user_id: i64, points: i64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            UPDATE users SET
                all_time_score = all_time_score + ?1,
                weekly_score = weekly_score + ?1,
                monthly_score = monthly_score + ?1,
                last_game_score = ?1
            WHERE id = ?2
            "#,
            params![points, user_id],
        )
        .await?;

        tracing::info!("scores updated for user_id={user_id}: +{points}");
        Ok(())
    }

    /// Record the outcome of a daily attempt: new streak length and the
    /// attempt date. Touches nothing else.
    pub async fn update_streak(&self, user_id: i64, streak: i64, attempt_date: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE users SET daily_streak = ?, last_attempt_date = ? WHERE id = ?",
            params![streak, attempt_date, user_id],
        )
        .await?;

        tracing::info!("streak for user_id={user_id} is now {streak}");
        Ok(())
    }

    /// Merge-update the preference fields; `None` leaves a field as-is.
    pub async fn update_preferences(&self, user_id: i64, update: &PreferencesUpdate) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            UPDATE users SET
                preferred_difficulty = COALESCE(?, preferred_difficulty),
                preferred_question_count = COALESCE(?, preferred_question_count),
                notification_hour = COALESCE(?, notification_hour),
                avatar = COALESCE(?, avatar)
            WHERE id = ?
            "#,
            params![
                update.preferred_difficulty.clone(),
                update.preferred_question_count,
                update.notification_hour,
                update.avatar.clone(),
                user_id
            ],
        )
        .await?;

        Ok(())
    }

    // --- session tokens -----------------------------------------------------

    pub async fn create_user_session(&self, user_id: i64) -> Result<String> {
        let session = Ulid::new().to_string();
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO user_sessions (id, user_id) VALUES (?, ?)",
            params![session.clone(), user_id],
        )
        .await?;

        tracing::info!("new user session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn get_user_by_session(&self, session_id: &str) -> Result<Option<AuthUser>> {
        let conn = self.connect()?;
        query_optional(
            &conn,
            r#"
            SELECT u.id, u.display_name
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = ?
            "#,
            params![session_id],
        )
        .await
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "DELETE FROM user_sessions WHERE id = ?",
            params![session_id],
        )
        .await?;
        Ok(())
    }
}

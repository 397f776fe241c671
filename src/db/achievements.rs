use color_eyre::Result;
use libsql::params;

use super::helpers::query_all;
use super::models::AchievementRow;
use super::Db;

impl Db {
    /// Unlock an achievement for a user. Returns `true` only when this
    /// call flipped it from locked to unlocked; an already-unlocked
    /// achievement is left untouched, `unlocked_at` included.
    pub async fn unlock_achievement(
        &self,
        user_id: i64,
        achievement_id: &str,
        unlocked_at: &str,
    ) -> Result<bool> {
        let conn = self.connect()?;
        let affected = conn
            .execute(
                r#"
                INSERT INTO achievements (user_id, achievement_id, unlocked, unlocked_at)
                VALUES (?, ?, TRUE, ?)
                ON CONFLICT(user_id, achievement_id) DO UPDATE
                    SET unlocked = TRUE, unlocked_at = excluded.unlocked_at
                    WHERE achievements.unlocked = FALSE
                "#,
                params![user_id, achievement_id, unlocked_at],
            )
            .await?;

        let newly_unlocked = affected > 0;
        if newly_unlocked {
            tracing::info!("achievement '{achievement_id}' unlocked for user_id={user_id}");
        }
        Ok(newly_unlocked)
    }

    pub async fn achievements_for_user(&self, user_id: i64) -> Result<Vec<AchievementRow>> {
        let conn = self.connect()?;
        query_all(
            &conn,
            "SELECT achievement_id, unlocked, unlocked_at FROM achievements WHERE user_id = ? ORDER BY id",
            params![user_id],
        )
        .await
    }
}

use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::helpers::query_all;
use super::models::SavedFactRow;
use super::Db;

impl Db {
    /// Hand out the next fact number for this user.
    pub async fn next_fact_number(&self, user_id: i64) -> Result<i64> {
        let conn = self.connect()?;
        let number = conn
            .query(
                "UPDATE users SET fact_counter = fact_counter + 1 WHERE id = ? RETURNING fact_counter",
                params![user_id],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("user not found for fact counter")?
            .get::<i64>(0)?;

        Ok(number)
    }

    pub async fn append_saved_fact(
        &self,
        user_id: i64,
        fact_number: i64,
        fact_text: &str,
        saved_date: &str,
    ) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO saved_facts (user_id, fact_number, fact_text, saved_date) VALUES (?, ?, ?, ?)",
            params![user_id, fact_number, fact_text, saved_date],
        )
        .await?;

        tracing::info!("fact #{fact_number} saved for user_id={user_id}");
        Ok(())
    }

    /// Saved facts in insertion order.
    pub async fn saved_facts(&self, user_id: i64) -> Result<Vec<SavedFactRow>> {
        let conn = self.connect()?;
        query_all(
            &conn,
            "SELECT fact_number, fact_text, saved_date FROM saved_facts WHERE user_id = ? ORDER BY id",
            params![user_id],
        )
        .await
    }
}

// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(conn: &libsql::Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            display_name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT '',
            avatar TEXT NOT NULL DEFAULT 'default',
            join_date TEXT NOT NULL,
            all_time_score INTEGER NOT NULL DEFAULT 0,
            weekly_score INTEGER NOT NULL DEFAULT 0,
            monthly_score INTEGER NOT NULL DEFAULT 0,
            last_game_score INTEGER NOT NULL DEFAULT 0,
            preferred_difficulty TEXT NOT NULL DEFAULT 'any',
            preferred_question_count INTEGER NOT NULL DEFAULT 10,
            notification_hour INTEGER NOT NULL DEFAULT -1,
            daily_streak INTEGER NOT NULL DEFAULT 0,
            last_attempt_date TEXT,
            fact_counter INTEGER NOT NULL DEFAULT 0
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS user_sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS achievements (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            achievement_id TEXT NOT NULL,
            unlocked BOOLEAN NOT NULL DEFAULT FALSE,
            unlocked_at TEXT,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
            UNIQUE(user_id, achievement_id)
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS saved_facts (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            fact_number INTEGER NOT NULL,
            fact_text TEXT NOT NULL,
            saved_date TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
        (),
    )
    .await?;

    // Singleton row; reset timestamps only ever move forward.
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS score_resets (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            last_weekly_reset TEXT,
            last_monthly_reset TEXT
        )
        "#,
        (),
    )
    .await?;

    Ok(())
}

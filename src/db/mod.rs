// Database module - provides data access layer

use std::sync::Arc;

use color_eyre::{eyre::OptionExt, Result};

pub mod models;
pub use models::*;

mod achievements;
mod facts;
mod helpers;
mod leaderboard;
mod profile;
mod reset;
mod schema;

pub use reset::ResetReport;

/// Main database handle. Cheap to clone; all access goes through typed
/// methods in the per-concern modules.
#[derive(Clone)]
pub struct Db {
    db: Arc<libsql::Database>,
}

impl Db {
    pub async fn new(url: &str, auth_token: &str) -> Result<Self> {
        let db = if let Some(path) = url.strip_prefix("file:") {
            libsql::Builder::new_local(path).build().await?
        } else {
            libsql::Builder::new_remote(url.to_owned(), auth_token.to_owned())
                .build()
                .await?
        };

        let conn = db.connect()?;

        // Verify connection
        let one = conn
            .query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_eyre("connection check failed")?
            .get::<i32>(0)?;
        assert_eq!(one, 1);

        schema::create_schema(&conn).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { db: Arc::new(db) })
    }

    pub(crate) fn connect(&self) -> Result<libsql::Connection> {
        Ok(self.db.connect()?)
    }
}

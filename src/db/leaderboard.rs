use color_eyre::Result;

use super::helpers::query_all;
use super::models::ProfileModel;
use super::profile::PROFILE_COLUMNS;
use crate::models::ScoreField;

use super::Db;

impl Db {
    /// All profiles ordered by the chosen score, highest first. Equal
    /// scores are broken by user id ascending so the ordering is stable
    /// across reads.
    pub async fn profiles_ordered(&self, field: ScoreField) -> Result<Vec<ProfileModel>> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM users ORDER BY {} DESC, id ASC",
            field.column()
        );
        query_all(&conn, &sql, ()).await
    }
}

use chrono::{DateTime, Utc};
use color_eyre::Result;

use crate::db::models::ProfileModel;
use crate::db::{Db, ResetReport};
use crate::game::achievements;
use crate::models::ScoreField;
use crate::services::game::UnlockedAchievement;

// ---------------------------------------------------------------------------
// LeaderboardRepository trait
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait LeaderboardRepository: Send + Sync {
    fn profiles_ordered(
        &self,
        field: ScoreField,
    ) -> impl std::future::Future<Output = Result<Vec<ProfileModel>>> + Send;

    fn check_and_reset_scores(
        &self,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<ResetReport>> + Send;

    fn unlock_achievement(
        &self,
        user_id: i64,
        achievement_id: &str,
        unlocked_at: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl LeaderboardRepository for Db {
    async fn profiles_ordered(&self, field: ScoreField) -> Result<Vec<ProfileModel>> {
        Db::profiles_ordered(self, field).await
    }

    async fn check_and_reset_scores(&self, now: DateTime<Utc>) -> Result<ResetReport> {
        Db::check_and_reset_scores(self, now).await
    }

    async fn unlock_achievement(
        &self,
        user_id: i64,
        achievement_id: &str,
        unlocked_at: &str,
    ) -> Result<bool> {
        Db::unlock_achievement(self, user_id, achievement_id, unlocked_at).await
    }
}

// ---------------------------------------------------------------------------
// LeaderboardService
// ---------------------------------------------------------------------------

pub struct LeaderboardView {
    /// All profiles, best first.
    pub entries: Vec<ProfileModel>,
    /// 1-based position of the viewing user.
    pub rank: usize,
    pub unlocked: Vec<UnlockedAchievement>,
}

pub struct LeaderboardService<R: LeaderboardRepository = Db> {
    repo: R,
}

impl<R: LeaderboardRepository> LeaderboardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The display list for one score field. The periodic reset check runs
    /// first so a stale pre-reset score is never shown; if the check
    /// itself fails the current scores are served anyway.
    pub async fn leaderboard(
        &self,
        field: ScoreField,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProfileModel>> {
        if let Err(e) = self.repo.check_and_reset_scores(now).await {
            tracing::warn!("score reset check failed, serving current scores: {e}");
        }

        self.repo.profiles_ordered(field).await
    }

    /// 1-based rank of `user_id` within the ordering, scanning from the
    /// top and stopping at the first match. `None` when the user has no
    /// profile.
    pub fn rank_of(entries: &[ProfileModel], user_id: i64) -> Option<usize> {
        entries
            .iter()
            .position(|p| p.id == user_id)
            .map(|idx| idx + 1)
    }

    /// A user viewing the leaderboard: list, their rank, and the
    /// Leaderboard Elite unlock when they sit in the top 3.
    pub async fn view(
        &self,
        user_id: i64,
        field: ScoreField,
        now: DateTime<Utc>,
    ) -> Result<Option<LeaderboardView>> {
        let entries = self.leaderboard(field, now).await?;

        let Some(rank) = Self::rank_of(&entries, user_id) else {
            return Ok(None);
        };

        let mut unlocked = Vec::new();
        if let Some(achievement) = achievements::earned_for_rank(rank) {
            let newly = self
                .repo
                .unlock_achievement(user_id, achievement.id(), &now.to_rfc3339())
                .await?;
            if newly {
                let message = format!("Achievement Unlocked: {}", achievement.title());
                tracing::info!("{message} (user_id={user_id})");
                unlocked.push(UnlockedAchievement {
                    id: achievement.id(),
                    title: achievement.title(),
                    message,
                });
            }
        }

        Ok(Some(LeaderboardView {
            entries,
            rank,
            unlocked,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

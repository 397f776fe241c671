use chrono::{DateTime, NaiveDate, Utc};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;

use crate::db::models::ProfileModel;
use crate::db::Db;
use crate::game::achievements::{self, QuizFacts};
use crate::game::streak::{self, StreakOutcome};
use crate::game::{Achievement, QuestionResult};

// ---------------------------------------------------------------------------
// GameRepository trait (the service defines the store shape it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait GameRepository: Send + Sync {
    fn get_profile(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ProfileModel>>> + Send;

    fn add_game_score(
        &self,
        user_id: i64,
        points: i64,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn update_streak(
        &self,
        user_id: i64,
        streak: i64,
        attempt_date: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn unlock_achievement(
        &self,
        user_id: i64,
        achievement_id: &str,
        unlocked_at: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl GameRepository for Db {
    async fn get_profile(&self, user_id: i64) -> Result<Option<ProfileModel>> {
        Db::get_profile(self, user_id).await
    }

    async fn add_game_score(&self, user_id: i64, points: i64) -> Result<()> {
        Db::add_game_score(self, user_id, points).await
    }

    async fn update_streak(&self, user_id: i64, streak: i64, attempt_date: &str) -> Result<()> {
        Db::update_streak(self, user_id, streak, attempt_date).await
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
// Outcomes
// ---------------------------------------------------------------------------

pub enum DailyStartOutcome {
    Ready,
    /// The user already took today's question; nothing was changed.
    AlreadyAttempted,
}

/// Everything the client needs to render the finish screen.
#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub total_score: i64,
    pub streak_bonus: i64,
    /// New streak length; present only when the daily path ran.
    pub daily_streak: Option<i64>,
    pub correct_answers: usize,
    pub total_questions: usize,
    /// Achievements that unlocked just now; each appears here exactly
    /// once, on its first unlock.
    pub unlocked: Vec<UnlockedAchievement>,
}

#[derive(Debug, Serialize)]
pub struct UnlockedAchievement {
    pub id: &'static str,
    pub title: &'static str,
    pub message: String,
}

// ---------------------------------------------------------------------------
// GameService
// ---------------------------------------------------------------------------

pub struct GameService<R: GameRepository = Db> {
    repo: R,
}

impl<R: GameRepository> GameService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gate for the daily-question flow: at most one attempt per calendar
    /// day.
    pub async fn daily_start(&self, user_id: i64, today: NaiveDate) -> Result<DailyStartOutcome> {
        let profile = self
            .repo
            .get_profile(user_id)
            .await?
            .ok_or_else(|| eyre!("profile missing for user {user_id}"))?;

        if profile.last_attempt_date.as_deref() == Some(today.to_string().as_str()) {
            return Ok(DailyStartOutcome::AlreadyAttempted);
        }

        Ok(DailyStartOutcome::Ready)
    }

    /// Post-session bookkeeping for a finished quiz: streak transition
    /// and bonus for a daily (single-question) session, score update, and
    /// achievement unlocks. The score write lands before achievements are
    /// judged.
    pub async fn complete_quiz(
        &self,
        user_id: i64,
        results: &[QuestionResult],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<QuizSummary> {
        let base_score: i64 = results.iter().map(|r| i64::from(r.score)).sum();
        let correct_answers = results.iter().filter(|r| r.score > 0).count();
        let is_daily = results.len() == 1;

        let mut streak_bonus = 0;
        let mut daily_streak = None;

        if is_daily {
            let profile = self
                .repo
                .get_profile(user_id)
                .await?
                .ok_or_else(|| eyre!("profile missing for user {user_id}"))?;

            let last_attempt = profile
                .last_attempt_date
                .as_deref()
                .and_then(|d| d.parse::<NaiveDate>().ok());

            match streak::advance(profile.daily_streak, last_attempt, today, correct_answers > 0) {
                StreakOutcome::Updated { streak, bonus } => {
                    self.repo
                        .update_streak(user_id, streak, &today.to_string())
                        .await?;
                    streak_bonus = bonus;
                    daily_streak = Some(streak);
                }
                StreakOutcome::AlreadyAttempted => {
                    // Started yesterday, finished today's second attempt:
                    // keep the score, leave the streak alone.
                    tracing::warn!("daily session for user_id={user_id} finished on an already-attempted day");
                }
            }
        }

        let total_score = base_score + streak_bonus;
        self.repo.add_game_score(user_id, total_score).await?;

        let earned = achievements::earned_for_quiz(QuizFacts {
            total_questions: results.len(),
            correct_answers,
            is_daily,
        });
        let unlocked = self.unlock_all(user_id, &earned, now).await?;

        tracing::info!(
            "quiz complete for user_id={user_id}: score={total_score} ({correct_answers}/{} correct)",
            results.len()
        );

        Ok(QuizSummary {
            total_score,
            streak_bonus,
            daily_streak,
            correct_answers,
            total_questions: results.len(),
            unlocked,
        })
    }

    async fn unlock_all(
        &self,
        user_id: i64,
        earned: &[Achievement],
        now: DateTime<Utc>,
    ) -> Result<Vec<UnlockedAchievement>> {
        let mut unlocked = Vec::new();

        for &achievement in earned {
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

        Ok(unlocked)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionType};
    use mockall::predicate::eq;

    fn profile(streak: i64, last_attempt: Option<&str>) -> ProfileModel {
        ProfileModel {
            id: 1,
            display_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar: "default".to_string(),
            join_date: "2025-01-01".to_string(),
            all_time_score: 100,
            weekly_score: 10,
            monthly_score: 40,
            last_game_score: 7,
            preferred_difficulty: "any".to_string(),
            preferred_question_count: 10,
            notification_hour: -1,
            daily_streak: streak,
            last_attempt_date: last_attempt.map(str::to_string),
            fact_counter: 0,
        }
    }

    fn result(score: u32) -> QuestionResult {
        QuestionResult {
            time_taken_secs: 5,
            qtype: QuestionType::Multiple,
            difficulty: Difficulty::Medium,
            score,
        }
    }

    fn today() -> NaiveDate {
        "2025-03-10".parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2025-03-10T12:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn multi_question_quiz_updates_score_without_streak() {
        let mut repo = MockGameRepository::new();
        repo.expect_add_game_score()
            .with(eq(1), eq(9))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        repo.expect_update_streak().times(0);
        repo.expect_unlock_achievement().times(0);

        let service = GameService::new(repo);
        let summary = service
            .complete_quiz(1, &[result(4), result(5), result(0)], today(), now())
            .await
            .unwrap();

        assert_eq!(summary.total_score, 9);
        assert_eq!(summary.streak_bonus, 0);
        assert_eq!(summary.daily_streak, None);
        assert_eq!(summary.correct_answers, 2);
        assert!(summary.unlocked.is_empty());
    }

    #[tokio::test]
    async fn perfect_quiz_unlocks_perfect_score_once() {
        let mut repo = MockGameRepository::new();
        repo.expect_add_game_score()
            .returning(|_, _| Box::pin(async { Ok(()) }));
        repo.expect_unlock_achievement()
            .with(eq(1), eq("perfect_score"), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let service = GameService::new(repo);
        let summary = service
            .complete_quiz(1, &[result(4), result(5)], today(), now())
            .await
            .unwrap();

        assert_eq!(summary.unlocked.len(), 1);
        assert_eq!(summary.unlocked[0].id, "perfect_score");
        assert_eq!(summary.unlocked[0].message, "Achievement Unlocked: Perfect Score");
    }

    #[tokio::test]
    async fn repeat_perfect_quiz_surfaces_no_notification() {
        let mut repo = MockGameRepository::new();
        repo.expect_add_game_score()
            .returning(|_, _| Box::pin(async { Ok(()) }));
        repo.expect_unlock_achievement()
            .returning(|_, _, _| Box::pin(async { Ok(false) }));

        let service = GameService::new(repo);
        let summary = service
            .complete_quiz(1, &[result(4), result(5)], today(), now())
            .await
            .unwrap();

        assert!(summary.unlocked.is_empty());
    }

    #[tokio::test]
    async fn correct_daily_pays_streak_bonus_and_increments() {
        let mut repo = MockGameRepository::new();
        repo.expect_get_profile()
            .returning(|_| Box::pin(async { Ok(Some(profile(4, Some("2025-03-09")))) }));
        repo.expect_update_streak()
            .with(eq(1), eq(5), eq("2025-03-10"))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        // 5 base points + 4 bonus
        repo.expect_add_game_score()
            .with(eq(1), eq(9))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        repo.expect_unlock_achievement()
            .with(eq(1), eq("daily_champion"), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let service = GameService::new(repo);
        let summary = service
            .complete_quiz(1, &[result(5)], today(), now())
            .await
            .unwrap();

        assert_eq!(summary.total_score, 9);
        assert_eq!(summary.streak_bonus, 4);
        assert_eq!(summary.daily_streak, Some(5));
        assert_eq!(summary.unlocked[0].id, "daily_champion");
    }

    #[tokio::test]
    async fn wrong_daily_resets_streak_and_still_unlocks_champion() {
        let mut repo = MockGameRepository::new();
        repo.expect_get_profile()
            .returning(|_| Box::pin(async { Ok(Some(profile(4, Some("2025-03-09")))) }));
        repo.expect_update_streak()
            .with(eq(1), eq(0), eq("2025-03-10"))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        repo.expect_add_game_score()
            .with(eq(1), eq(0))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        repo.expect_unlock_achievement()
            .with(eq(1), eq("daily_champion"), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let service = GameService::new(repo);
        let summary = service
            .complete_quiz(1, &[result(0)], today(), now())
            .await
            .unwrap();

        assert_eq!(summary.total_score, 0);
        assert_eq!(summary.streak_bonus, 0);
        assert_eq!(summary.daily_streak, Some(0));
    }

    #[tokio::test]
    async fn daily_start_rejects_second_attempt_same_day() {
        let mut repo = MockGameRepository::new();
        repo.expect_get_profile()
            .returning(|_| Box::pin(async { Ok(Some(profile(2, Some("2025-03-10")))) }));

        let service = GameService::new(repo);
        let outcome = service.daily_start(1, today()).await.unwrap();
        assert!(matches!(outcome, DailyStartOutcome::AlreadyAttempted));
    }

    #[tokio::test]
    async fn daily_start_allows_fresh_day() {
        let mut repo = MockGameRepository::new();
        repo.expect_get_profile()
            .returning(|_| Box::pin(async { Ok(Some(profile(2, Some("2025-03-09")))) }));

        let service = GameService::new(repo);
        let outcome = service.daily_start(1, today()).await.unwrap();
        assert!(matches!(outcome, DailyStartOutcome::Ready));
    }
}

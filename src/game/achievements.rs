use serde::Serialize;

/// The fixed achievement catalog. Ids are stable and stored per user; a
/// missing per-user record means locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    PerfectScore,
    DailyChampion,
    LeaderboardElite,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::PerfectScore,
        Achievement::DailyChampion,
        Achievement::LeaderboardElite,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "perfect_score",
            Achievement::DailyChampion => "daily_champion",
            Achievement::LeaderboardElite => "top_three",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "Perfect Score",
            Achievement::DailyChampion => "Daily Champion",
            Achievement::LeaderboardElite => "Leaderboard Elite",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "Get all questions right in a quiz",
            Achievement::DailyChampion => "Complete a daily quiz",
            Achievement::LeaderboardElite => "Place in the top 3 of any leaderboard",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "ic_trophy",
            Achievement::DailyChampion => "ic_calendar",
            Achievement::LeaderboardElite => "ic_medal",
        }
    }

    pub fn from_id(id: &str) -> Option<Achievement> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

/// Facts about a finished quiz session that the unlock predicates read.
#[derive(Debug, Clone, Copy)]
pub struct QuizFacts {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub is_daily: bool,
}

/// Achievements earned by a finished quiz. A perfect single-question
/// session does not count as a Perfect Score; completing the daily
/// question always earns Daily Champion, correct or not.
pub fn earned_for_quiz(facts: QuizFacts) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if facts.is_daily {
        earned.push(Achievement::DailyChampion);
    }
    if facts.total_questions > 1 && facts.correct_answers == facts.total_questions {
        earned.push(Achievement::PerfectScore);
    }

    earned
}

/// Achievement earned by holding `rank` on a leaderboard, if any.
pub fn earned_for_rank(rank: usize) -> Option<Achievement> {
    (rank <= 3).then_some(Achievement::LeaderboardElite)
}

// Core quiz rules: session state, scoring, streaks, achievements.

pub mod achievements;
pub mod scoring;
pub mod session;
pub mod streak;

pub use achievements::Achievement;
pub use session::{QuestionResult, QuizSession};

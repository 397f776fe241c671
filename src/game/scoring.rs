use crate::models::{Difficulty, QuestionType};
use crate::names;

/// Point value of a correctly answered question.
///
/// Difficulty is worth 1/2/3, type 1 (true-false) or 2 (multiple choice),
/// and the time bonus is `time_remaining / 10` in integer seconds, so with
/// the 10 s question timer it is 0 or 1.
pub fn points(difficulty: Difficulty, qtype: QuestionType, time_remaining_secs: u32) -> u32 {
    let difficulty_points = match difficulty {
        Difficulty::Easy => 1,
        Difficulty::Medium => 2,
        Difficulty::Hard => 3,
    };
    let type_points = match qtype {
        QuestionType::Boolean => 1,
        QuestionType::Multiple => 2,
    };
    let time_bonus = time_remaining_secs / names::QUESTION_TIME_LIMIT_SECS;

    difficulty_points + type_points + time_bonus
}

/// Score an answer: full points when `selected` matches the correct
/// answer, 0 on a miss or no answer.
pub fn score_answer(
    selected: Option<&str>,
    correct_answer: &str,
    difficulty: Difficulty,
    qtype: QuestionType,
    time_remaining_secs: u32,
) -> u32 {
    match selected {
        Some(answer) if answer == correct_answer => points(difficulty, qtype, time_remaining_secs),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_bounded() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for qtype in [QuestionType::Boolean, QuestionType::Multiple] {
                for remaining in 0..=10 {
                    let p = points(difficulty, qtype, remaining);
                    assert!((0..=6).contains(&p), "points {p} out of range");
                }
            }
        }
    }

    #[test]
    fn points_follow_the_table() {
        assert_eq!(points(Difficulty::Easy, QuestionType::Boolean, 0), 2);
        assert_eq!(points(Difficulty::Easy, QuestionType::Boolean, 10), 3);
        assert_eq!(points(Difficulty::Medium, QuestionType::Multiple, 9), 4);
        assert_eq!(points(Difficulty::Hard, QuestionType::Multiple, 10), 6);
    }

    #[test]
    fn wrong_or_missing_answer_scores_zero() {
        assert_eq!(
            score_answer(Some("Paris"), "London", Difficulty::Hard, QuestionType::Multiple, 10),
            0
        );
        assert_eq!(
            score_answer(None, "London", Difficulty::Hard, QuestionType::Multiple, 10),
            0
        );
    }

    #[test]
    fn correct_answer_scores_full_points() {
        assert_eq!(
            score_answer(Some("London"), "London", Difficulty::Hard, QuestionType::Multiple, 10),
            6
        );
    }
}

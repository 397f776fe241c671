use chrono::NaiveDate;

/// Result of applying a daily-question attempt to the streak state.
#[derive(Debug, PartialEq, Eq)]
pub enum StreakOutcome {
    Updated {
        /// New streak length to persist.
        streak: i64,
        /// Bonus points for today's score: the pre-update streak when the
        /// answer was correct, 0 otherwise.
        bonus: i64,
    },
    /// The daily question was already attempted today; state is unchanged.
    AlreadyAttempted,
}

/// Advance the daily streak for an attempt made on `today`.
///
/// At most one attempt per calendar day: a second call with the same date
/// returns [`StreakOutcome::AlreadyAttempted`]. A correct answer increments
/// the streak, a wrong one resets it to 0; either way `today` becomes the
/// new last-attempt date.
pub fn advance(
    streak: i64,
    last_attempt: Option<NaiveDate>,
    today: NaiveDate,
    correct: bool,
) -> StreakOutcome {
    if last_attempt == Some(today) {
        return StreakOutcome::AlreadyAttempted;
    }

    if correct {
        StreakOutcome::Updated {
            streak: streak + 1,
            bonus: streak,
        }
    } else {
        StreakOutcome::Updated { streak: 0, bonus: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn correct_answer_increments_and_pays_previous_streak() {
        let outcome = advance(4, Some(date("2025-03-09")), date("2025-03-10"), true);
        assert_eq!(outcome, StreakOutcome::Updated { streak: 5, bonus: 4 });
    }

    #[test]
    fn wrong_answer_resets_with_no_bonus() {
        let outcome = advance(4, Some(date("2025-03-09")), date("2025-03-10"), false);
        assert_eq!(outcome, StreakOutcome::Updated { streak: 0, bonus: 0 });
    }

    #[test]
    fn first_ever_attempt_starts_a_streak() {
        let outcome = advance(0, None, date("2025-03-10"), true);
        assert_eq!(outcome, StreakOutcome::Updated { streak: 1, bonus: 0 });
    }

    #[test]
    fn second_attempt_same_day_is_rejected() {
        let today = date("2025-03-10");
        assert_eq!(
            advance(5, Some(today), today, true),
            StreakOutcome::AlreadyAttempted
        );
        assert_eq!(
            advance(5, Some(today), today, false),
            StreakOutcome::AlreadyAttempted
        );
    }
}

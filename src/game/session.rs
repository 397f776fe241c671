use color_eyre::{eyre::eyre, Result};
use serde::Serialize;

use crate::game::scoring;
use crate::models::{Difficulty, Question, QuestionType};
use crate::names;

/// Outcome of one answered (or timed-out) question. Append-only; never
/// mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub time_taken_secs: u32,
    pub qtype: QuestionType,
    pub difficulty: Difficulty,
    pub score: u32,
}

/// State of one quiz run: the ordered question list, the position within
/// it, and the accumulated per-question results.
///
/// Invariants: the index only moves forward, one step per [`advance`];
/// `results.len() == current_index` after each advance; the session is
/// terminal once every question has been consumed.
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    results: Vec<QuestionResult>,
    answered_current: bool,
}

impl QuizSession {
    pub fn start(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(eyre!("cannot start a quiz with no questions"));
        }

        Ok(Self {
            questions,
            current_index: 0,
            results: Vec::new(),
            answered_current: false,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_terminal(&self) -> bool {
        self.current_index == self.questions.len()
    }

    /// Score the submitted answer against the current question and append
    /// its result. `None` (no selection, or the timer ran out) scores 0.
    ///
    /// Calling this again before [`advance`] is ignored and returns `None`,
    /// so a duplicate tap cannot double-count a question.
    pub fn record_answer(
        &mut self,
        selected: Option<&str>,
        time_remaining_secs: u32,
    ) -> Option<&QuestionResult> {
        if self.answered_current || self.is_terminal() {
            return None;
        }

        let time_remaining = time_remaining_secs.min(names::QUESTION_TIME_LIMIT_SECS);
        let question = &self.questions[self.current_index];
        let score = scoring::score_answer(
            selected,
            &question.correct_answer,
            question.difficulty,
            question.qtype,
            time_remaining,
        );

        self.results.push(QuestionResult {
            time_taken_secs: names::QUESTION_TIME_LIMIT_SECS - time_remaining,
            qtype: question.qtype,
            difficulty: question.difficulty,
            score,
        });
        self.answered_current = true;

        self.results.last()
    }

    /// Move to the next question. Returns whether the session is now
    /// terminal. The current question must have a recorded result first.
    pub fn advance(&mut self) -> Result<bool> {
        if self.is_terminal() {
            return Ok(true);
        }
        if !self.answered_current {
            return Err(eyre!("cannot advance past an unanswered question"));
        }

        self.current_index += 1;
        self.answered_current = false;
        Ok(self.is_terminal())
    }

    /// The finished result list. Only meaningful once terminal; this is
    /// the sole hand-off between in-session play and post-session
    /// bookkeeping.
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Question difficulty as reported by the trivia provider. Values outside
/// this set are rejected at the parse boundary, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(color_eyre::eyre::eyre!("unknown difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Boolean,
    Multiple,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Boolean => "boolean",
            QuestionType::Multiple => "multiple",
        }
    }
}

impl FromStr for QuestionType {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(QuestionType::Boolean),
            "multiple" => Ok(QuestionType::Multiple),
            other => Err(color_eyre::eyre::eyre!("unknown question type: {other}")),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trivia question as returned by the provider. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(rename = "question")]
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// Provider response envelope. `response_code` 0 means success.
#[derive(Debug, Deserialize)]
pub struct TriviaResponse {
    pub response_code: i32,
    pub results: Vec<Question>,
}

/// One entry from the facts provider.
#[derive(Debug, Deserialize)]
pub struct FactResponse {
    pub fact: String,
}

/// Which score column a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    AllTime,
    Weekly,
    Monthly,
}

impl ScoreField {
    pub fn column(&self) -> &'static str {
        match self {
            ScoreField::AllTime => "all_time_score",
            ScoreField::Weekly => "weekly_score",
            ScoreField::Monthly => "monthly_score",
        }
    }
}

impl FromStr for ScoreField {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_time" => Ok(ScoreField::AllTime),
            "weekly" => Ok(ScoreField::Weekly),
            "monthly" => Ok(ScoreField::Monthly),
            other => Err(color_eyre::eyre::eyre!("unknown score field: {other}")),
        }
    }
}

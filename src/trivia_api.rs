use color_eyre::{eyre::bail, Result};

use crate::models::{Question, TriviaResponse};
use crate::utils;

/// Client for the trivia question provider (OpenTDB-compatible API).
#[derive(Clone)]
pub struct TriviaClient {
    base_url: String,
    http: reqwest::Client,
}

impl TriviaClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch `amount` questions. Absent filters are omitted from the
    /// request entirely, not sent as empty values. A non-zero response
    /// code or an empty result list is an error; a quiz must never start
    /// from a partial fetch.
    pub async fn fetch_questions(
        &self,
        amount: u32,
        category: Option<u32>,
        difficulty: Option<&str>,
        qtype: Option<&str>,
    ) -> Result<Vec<Question>> {
        let mut query: Vec<(&str, String)> = vec![("amount", amount.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        if let Some(difficulty) = difficulty {
            query.push(("difficulty", difficulty.to_string()));
        }
        if let Some(qtype) = qtype {
            query.push(("type", qtype.to_string()));
        }

        let resp = self
            .http
            .get(format!("{}/api.php", self.base_url))
            .query(&query)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            tracing::error!("trivia API error: {status}");
            bail!("trivia API returned {status}");
        }

        let body: TriviaResponse = resp.json().await?;

        if body.response_code != 0 {
            bail!("trivia API response code {}", body.response_code);
        }
        if body.results.is_empty() {
            bail!("trivia API returned no questions");
        }

        Ok(body.results.into_iter().map(decode_question).collect())
    }
}

/// The provider HTML-escapes all text fields; decode once, at the fetch
/// boundary, so gameplay and answer matching see human-readable strings.
fn decode_question(q: Question) -> Question {
    Question {
        text: utils::decode_html(&q.text),
        category: utils::decode_html(&q.category),
        correct_answer: utils::decode_html(&q.correct_answer),
        incorrect_answers: q
            .incorrect_answers
            .iter()
            .map(|a| utils::decode_html(a))
            .collect(),
        ..q
    }
}

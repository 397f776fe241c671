use color_eyre::{eyre::bail, Result};

use crate::models::FactResponse;

/// Client for the random-fact provider (API-Ninjas-compatible).
#[derive(Clone)]
pub struct FactClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl FactClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    pub async fn random_fact(&self) -> Result<String> {
        let resp = self
            .http
            .get(format!("{}/v1/facts", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            tracing::error!("fact API error: {status}");
            bail!("fact API returned {status}");
        }

        let facts: Vec<FactResponse> = resp.json().await?;
        match facts.into_iter().next() {
            Some(first) => Ok(first.fact),
            None => bail!("fact API returned no facts"),
        }
    }
}

//! Gemini backed [`Commentator`]. Any failure is logged and answered with [`FALLBACK_COMMENTARY`].

mod payload;
mod prompt;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use aura::api::{Commentator, FALLBACK_COMMENTARY};
use aura::ProfileSummary;
use log::{debug, error};
use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::payload::{GenerateRequest, GenerateResponse};

pub struct GeminiClient {
    client: reqwest::Client,
    gemini_url: String,
    model: String,
    api_key: SecretString,
}

pub struct GeminiClientBuilder {
    client_builder: ClientBuilder,
    gemini_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClientBuilder {
    pub fn new(api_key: SecretString) -> Self {
        GeminiClientBuilder {
            client_builder: ClientBuilder::default(),
            gemini_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key,
        }
    }

    pub fn with_gemini_url<STR: AsRef<str>>(mut self, url: STR) -> Self {
        self.gemini_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model<STR: AsRef<str>>(mut self, model: STR) -> Self {
        self.model = model.as_ref().to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client_builder = self.client_builder.timeout(timeout);
        self
    }

    pub fn build(self) -> anyhow::Result<GeminiClient> {
        Url::parse(&self.gemini_url).with_context(|| format!("Invalid Gemini URL: {}", self.gemini_url))?;
        let client = self.client_builder.build()?;
        Ok(GeminiClient {
            client,
            gemini_url: self.gemini_url,
            model: self.model,
            api_key: self.api_key,
        })
    }
}

impl GeminiClient {
    async fn generate(&self, prompt: String) -> anyhow::Result<String> {
        let request_url = format!("{}/v1beta/models/{}:generateContent", self.gemini_url, self.model);
        debug!("POST {}", request_url);
        let response = self
            .client
            .post(request_url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&GenerateRequest::new(prompt))
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;
        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("No roast generated"))
    }
}

#[async_trait]
impl Commentator for GeminiClient {
    async fn generate_commentary(&self, summary: &ProfileSummary) -> String {
        match self.generate(prompt::roast_prompt(summary)).await {
            Ok(text) => text,
            Err(err) => {
                error!("Roast generation failed: {}", describe(err));
                FALLBACK_COMMENTARY.to_string()
            }
        }
    }
}

/// The API key travels in the query string, keep it out of the logs.
fn describe(err: anyhow::Error) -> String {
    match err.downcast::<reqwest::Error>() {
        Ok(err) => err.without_url().to_string(),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura::{CommitFrequency, ContributionStrategy};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary() -> ProfileSummary {
        ProfileSummary {
            username: "octocat".to_string(),
            avatar_url: "https://avatars.example/octocat".to_string(),
            main_language: Some("Rust".to_string()),
            commit_frequency: CommitFrequency::Casual,
            repo_count: 8,
            commit_count: 120,
            commit_source: ContributionStrategy::Contributors,
            degraded_lookups: 0,
            followers: 3,
            account_age_days: 400,
            aura_score: 74,
        }
    }

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClientBuilder::new(SecretString::new("k3y".to_string()))
            .with_gemini_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn generated_text_test() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "k3y"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "temperature": 0.9, "topK": 40, "maxOutputTokens": 120 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "candidates": [{ "content": { "parts": [{ "text": "Rust main? Touch grass, borrow checker enjoyer 🦀" }] } }] }"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate_commentary(&summary()).await;

        assert_eq!(text, "Rust main? Touch grass, borrow checker enjoyer 🦀");
    }

    #[tokio::test]
    async fn http_error_fallback_test() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let text = client(&server).generate_commentary(&summary()).await;

        assert_eq!(text, FALLBACK_COMMENTARY);
    }

    #[tokio::test]
    async fn no_candidates_fallback_test() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{ "candidates": [] }"#, "application/json"))
            .mount(&server)
            .await;

        let text = client(&server).generate_commentary(&summary()).await;

        assert_eq!(text, FALLBACK_COMMENTARY);
    }

    #[test]
    fn invalid_url_test() {
        let err = GeminiClientBuilder::new(SecretString::new("k3y".to_string()))
            .with_gemini_url("generativelanguage")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Invalid Gemini URL"), "{}", err);
    }

    #[test]
    fn prompt_test() {
        let prompt = prompt::roast_prompt(&summary());
        assert!(prompt.contains("- Main language: Rust"));
        assert!(prompt.contains("- Total commits: 120"));
        assert!(prompt.contains("- Commit frequency: Casual 😎\n"));
        assert!(prompt.contains("- Account age: 400 days"));
    }
}

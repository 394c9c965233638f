use crate::GithubClient;
use aura::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use std::time::Duration;

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("github-aura"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_static(API_VERSION),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: "https://api.github.com".to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    /// Every request will carry `Authorization: Bearer <token>`.
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let value = format!("Bearer {}", token.expose_secret());
        Ok(self.try_with_sensitive_header(header::AUTHORIZATION, value)?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Deadline of a single request. Without it requests may hang as long as the server lets them.
    pub fn with_timeout(mut self, timeout: Duration) -> GithubClientBuilder {
        self.client_builder = self.client_builder.timeout(timeout);
        self
    }

    fn try_with_sensitive_header(
        mut self,
        key: HeaderName,
        val: impl AsRef<str>,
    ) -> anyhow::Result<GithubClientBuilder> {
        let mut val = HeaderValue::from_str(val.as_ref())?;
        val.set_sensitive(true);
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(GithubClient {
            client,
            github_url: self.github_url,
        })
    }
}

#[test]
fn invalid_token_test() {
    let token = secrecy::SecretString::new("line\nbreak".to_string());
    assert!(GithubClientBuilder::default().try_with_token(token).is_err());
}

#[test]
fn trailing_slash_test() {
    let builder = GithubClientBuilder::default().with_github_url("http://localhost:8080/");
    assert_eq!(builder.github_url, "http://localhost:8080");
}

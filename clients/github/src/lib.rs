//! GitHub REST API client.
//!
//! Every request is a single GET against `github_url`, there are no retries here. Responses are classified
//! into [`Error::NotFound`] (404), [`Error::RateLimited`] (403, 429) and [`Error::FetchFailed`] (anything else).

mod builder;
mod link;
mod path;
mod payload;
mod rate_limit;

use async_trait::async_trait;
use aura::api::{Account, ActivityEvent, CommitsPage, Contributor, Error, Result};
use chrono::Utc;
use derive_more::Constructor;
use log::debug;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};

pub use builder::GithubClientBuilder;

use crate::rate_limit::RateLimit;

pub const MAX_REPOS_PAGE: u32 = 100;
const MAX_CONTRIBUTORS_PAGE: u32 = 100;

pub struct GithubClient {
    client: reqwest::Client,
    github_url: String,
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct GithubRepo {
    full_name: String,
    language: Option<String>,
}

impl aura::api::Repo for GithubRepo {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// One page of a listing.
#[derive(Debug, Constructor)]
pub struct ResourceSet<T> {
    pub items: Vec<T>,
    /// Number of the last page when the listing spans several pages.
    pub last_page: Option<u32>,
}

impl GithubClient {
    /// Lists `resource_path`. An empty `204 No Content` response is an empty listing.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource_path: &str,
        query: &[(&str, String)],
    ) -> Result<ResourceSet<T>> {
        let response = self.get(resource_path, query).await?;
        let last_page = link::last_page(response.headers());
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(ResourceSet::new(Vec::new(), last_page));
        }
        let items = read_response::<Vec<T>>(resource_path, response).await?;
        Ok(ResourceSet::new(items, last_page))
    }

    async fn fetch_object<T: DeserializeOwned>(&self, resource_path: &str) -> Result<T> {
        let response = self.get(resource_path, &[]).await?;
        read_response(resource_path, response).await
    }

    async fn get(&self, resource_path: &str, query: &[(&str, String)]) -> Result<Response> {
        let request_url = format!("{}{}", self.github_url, resource_path);
        debug!("GET {} {:?}", request_url, query);
        let response = self
            .client
            .get(request_url)
            .query(query)
            .send()
            .await
            .map_err(|err| Error::FetchFailed(format!("{}: {}", resource_path, err)))?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(Error::NotFound(resource_path.to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let limit = RateLimit::from_headers(response.headers());
                Err(Error::RateLimited(format!(
                    "{}: {}",
                    resource_path,
                    limit.describe(Utc::now().timestamp())
                )))
            }
            status => Err(Error::FetchFailed(format!("{}: status {}", resource_path, status))),
        }
    }
}

async fn read_response<T: DeserializeOwned>(resource_path: &str, response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| Error::FetchFailed(format!("{}: {}", resource_path, err)))
}

#[async_trait]
impl aura::api::Client<GithubRepo, MAX_REPOS_PAGE> for GithubClient {
    async fn account(&self, username: &str) -> Result<Account> {
        let user = self
            .fetch_object::<payload::User>(&path::user_path(username, "")?)
            .await?;
        Ok(user.into())
    }

    async fn repos(&self, username: &str, per_page: u32) -> Result<Vec<GithubRepo>> {
        let repos = self
            .fetch::<payload::Repo>(
                &path::user_path(username, "/repos")?,
                &[
                    ("per_page", per_page.min(MAX_REPOS_PAGE).to_string()),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                ],
            )
            .await?;
        Ok(repos.items.into_iter().map(GithubRepo::from).collect())
    }

    async fn contributors(&self, repo: &GithubRepo) -> Result<Vec<Contributor>> {
        let contributors = self
            .fetch::<payload::Contributor>(
                &path::repo_path(&repo.full_name, "/contributors")?,
                &[("per_page", MAX_CONTRIBUTORS_PAGE.to_string())],
            )
            .await?;
        Ok(contributors.items.into_iter().map(Contributor::from).collect())
    }

    async fn authored_commits(&self, repo: &GithubRepo, author: &str) -> Result<CommitsPage> {
        let commits = self
            .fetch::<IgnoredAny>(
                &path::repo_path(&repo.full_name, "/commits")?,
                &[("author", author.to_string()), ("per_page", "1".to_string())],
            )
            .await?;
        Ok(CommitsPage::new(commits.items.len() as u32, commits.last_page))
    }

    async fn public_events(&self, username: &str, page: u32, per_page: u32) -> Result<Vec<ActivityEvent>> {
        let events = self
            .fetch::<payload::Event>(
                &path::user_path(username, "/events/public")?,
                &[("page", page.to_string()), ("per_page", per_page.to_string())],
            )
            .await?;
        Ok(events.items.into_iter().map(ActivityEvent::from).collect())
    }
}

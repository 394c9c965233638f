use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use thiserror::Error;

use crate::ProfileSummary;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Text returned when commentary cannot be generated.
pub const FALLBACK_COMMENTARY: &str = "Couldn't generate a roast (API issue), but your code's probably mid anyway 💀";

pub trait Repo: Send + Sync {
    /// `owner/name`, used to address per repository resources.
    fn full_name(&self) -> &str;

    fn language(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Account {
    pub login: String,
    pub created_at: DateTime<Utc>,
    pub followers: u32,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub name: String,
    pub contributions: u32,
}

impl Contributor {
    pub fn new(name: impl Into<String>, contributions: u32) -> Self {
        Contributor {
            name: name.into(),
            contributions,
        }
    }
}

/// First page of commits authored by an account in a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct CommitsPage {
    /// Number of commits listed on the page.
    pub items: u32,
    /// Number of the last page, if the response was paginated.
    pub last_page: Option<u32>,
}

impl CommitsPage {
    /// Commits are requested one per page, so the last page number is the commit count.
    pub fn count(&self) -> u32 {
        self.last_page.unwrap_or(self.items)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct ActivityEvent {
    pub kind: String,
    pub actor: String,
    pub commits: u32,
}

impl ActivityEvent {
    pub const PUSH: &'static str = "PushEvent";

    pub fn is_push_by(&self, login: &str) -> bool {
        self.kind == Self::PUSH && self.actor.eq_ignore_ascii_case(login)
    }
}

#[async_trait]
pub trait Client<REPO: Repo, const MAX_REPOS_PAGE: u32>: Send + Sync {
    async fn account(&self, username: &str) -> Result<Account>;

    /// Repositories of `username`, most recently updated first.
    async fn repos(&self, username: &str, per_page: u32) -> Result<Vec<REPO>>;

    async fn contributors(&self, repo: &REPO) -> Result<Vec<Contributor>>;

    async fn authored_commits(&self, repo: &REPO, author: &str) -> Result<CommitsPage>;

    async fn public_events(&self, username: &str, page: u32, per_page: u32) -> Result<Vec<ActivityEvent>>;
}

/// Produces a short free text comment about a profile. Never fails, falls back to [`FALLBACK_COMMENTARY`].
#[async_trait]
pub trait Commentator: Send + Sync {
    async fn generate_commentary(&self, summary: &ProfileSummary) -> String;
}

/// Commentator used when no text generation service is configured.
pub struct StaticCommentator;

#[async_trait]
impl Commentator for StaticCommentator {
    async fn generate_commentary(&self, _summary: &ProfileSummary) -> String {
        FALLBACK_COMMENTARY.to_string()
    }
}

#[test]
fn commits_page_count_test() {
    assert_eq!(CommitsPage::new(1, Some(42)).count(), 42);
    assert_eq!(CommitsPage::new(1, None).count(), 1);
    assert_eq!(CommitsPage::new(0, None).count(), 0);
}

#[test]
fn push_event_test() {
    let event = ActivityEvent::new(ActivityEvent::PUSH.to_string(), "Octocat".to_string(), 3);
    assert!(event.is_push_by("octocat"));
    assert!(!event.is_push_by("someone"));

    let event = ActivityEvent::new("WatchEvent".to_string(), "octocat".to_string(), 0);
    assert!(!event.is_push_by("octocat"));
}

use crate::api::{Account, ActivityEvent, Client, CommitsPage, Contributor, Error, Repo, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockRepo {
    full_name: String,
    language: Option<String>,
}

impl MockRepo {
    pub fn new(full_name: &str, language: Option<&str>) -> Self {
        MockRepo {
            full_name: full_name.to_string(),
            language: language.map(str::to_string),
        }
    }
}

impl Repo for MockRepo {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    NotFound,
    RateLimited,
    Failed,
}

impl Failure {
    fn error(self, resource: &str) -> Error {
        match self {
            Failure::NotFound => Error::NotFound(resource.to_string()),
            Failure::RateLimited => Error::RateLimited(resource.to_string()),
            Failure::Failed => Error::FetchFailed(resource.to_string()),
        }
    }
}

/// In memory `Client`. Account, repositories and contributor lookups take `latency`,
/// contributor lookups are tracked to observe batching.
pub(crate) struct MockClient {
    account: std::result::Result<Account, Failure>,
    repos: std::result::Result<Vec<MockRepo>, Failure>,
    contributors: HashMap<String, std::result::Result<Vec<Contributor>, Failure>>,
    commits: HashMap<String, std::result::Result<CommitsPage, Failure>>,
    events: Vec<std::result::Result<Vec<ActivityEvent>, Failure>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    commit_calls: AtomicUsize,
    event_pages: Mutex<Vec<u32>>,
    contributor_calls: Mutex<Vec<String>>,
}

impl Default for MockClient {
    fn default() -> Self {
        MockClient {
            account: Ok(account("octocat", Utc::now(), 0)),
            repos: Ok(Vec::new()),
            contributors: HashMap::new(),
            commits: HashMap::new(),
            events: Vec::new(),
            latency: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            commit_calls: AtomicUsize::new(0),
            event_pages: Mutex::new(Vec::new()),
            contributor_calls: Mutex::new(Vec::new()),
        }
    }
}

pub(crate) fn account(login: &str, created_at: DateTime<Utc>, followers: u32) -> Account {
    Account::new(
        login.to_string(),
        created_at,
        followers,
        format!("https://avatars.example/{}", login),
    )
}

impl MockClient {
    pub fn with_account(mut self, account: std::result::Result<Account, Failure>) -> Self {
        self.account = account;
        self
    }

    pub fn with_repos(mut self, repos: std::result::Result<Vec<MockRepo>, Failure>) -> Self {
        self.repos = repos;
        self
    }

    pub fn with_contributors(
        mut self,
        repo: &MockRepo,
        contributors: std::result::Result<Vec<(&str, u32)>, Failure>,
    ) -> Self {
        let contributors = contributors.map(|contributors| {
            contributors
                .into_iter()
                .map(|(name, contributions)| Contributor::new(name, contributions))
                .collect()
        });
        self.contributors.insert(repo.full_name.clone(), contributors);
        self
    }

    pub fn with_commits(mut self, repo: &MockRepo, commits: std::result::Result<CommitsPage, Failure>) -> Self {
        self.commits.insert(repo.full_name.clone(), commits);
        self
    }

    pub fn with_event_page(mut self, page: std::result::Result<Vec<ActivityEvent>, Failure>) -> Self {
        self.events.push(page);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }

    pub fn event_pages(&self) -> Vec<u32> {
        self.event_pages.lock().unwrap().clone()
    }

    pub fn contributor_calls(&self) -> Vec<String> {
        self.contributor_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client<MockRepo, 100> for MockClient {
    async fn account(&self, username: &str) -> Result<Account> {
        tokio::time::sleep(self.latency).await;
        self.account.clone().map_err(|failure| failure.error(username))
    }

    async fn repos(&self, username: &str, _per_page: u32) -> Result<Vec<MockRepo>> {
        tokio::time::sleep(self.latency).await;
        self.repos.clone().map_err(|failure| failure.error(username))
    }

    async fn contributors(&self, repo: &MockRepo) -> Result<Vec<Contributor>> {
        self.contributor_calls.lock().unwrap().push(repo.full_name.clone());
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.contributors.get(&repo.full_name) {
            Some(contributors) => contributors.clone().map_err(|failure| failure.error(&repo.full_name)),
            None => Ok(Vec::new()),
        }
    }

    async fn authored_commits(&self, repo: &MockRepo, _author: &str) -> Result<CommitsPage> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        match self.commits.get(&repo.full_name) {
            Some(commits) => (*commits).map_err(|failure| failure.error(&repo.full_name)),
            None => Ok(CommitsPage::new(0, None)),
        }
    }

    async fn public_events(&self, username: &str, page: u32, _per_page: u32) -> Result<Vec<ActivityEvent>> {
        self.event_pages.lock().unwrap().push(page);
        match self.events.get(page as usize - 1) {
            Some(events) => events.clone().map_err(|failure| failure.error(username)),
            None => Ok(Vec::new()),
        }
    }
}

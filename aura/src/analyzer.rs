use crate::api::{self, Account, Client, Repo};
use crate::batch::BatchScheduler;
use crate::events::EventsCounter;
use crate::resolver::{ContributionResolver, ContributionTally};
use crate::summary::{account_age_days, aura_score, commits_per_day};
use crate::{AnalyzerConfig, CommitFrequency, ContributionStrategy, LanguageTally, ProfileSummary};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::{marker::PhantomData, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("GitHub user not found")]
    ProfileNotFound(String),
    #[error("GitHub API rate limit exceeded - try again later")]
    RateLimitExceeded(#[source] api::Error),
    #[error("Failed to fetch GitHub data")]
    AggregationFailed(#[source] api::Error),
}

impl AnalysisError {
    fn from_fetch(err: api::Error, username: &str) -> Self {
        match err {
            api::Error::NotFound(_) => AnalysisError::ProfileNotFound(username.to_string()),
            err @ api::Error::RateLimited(_) => AnalysisError::RateLimitExceeded(err),
            err => AnalysisError::AggregationFailed(err),
        }
    }
}

pub struct ProfileAnalyzer<REPO, const MAX_REPOS_PAGE: u32, CLIENT>
where
    REPO: Repo,
    CLIENT: 'static + Client<REPO, MAX_REPOS_PAGE>,
{
    client: Arc<CLIENT>,
    config: AnalyzerConfig,
    _repo_type: PhantomData<REPO>,
}

impl<REPO, const MAX_REPOS_PAGE: u32, CLIENT> ProfileAnalyzer<REPO, MAX_REPOS_PAGE, CLIENT>
where
    REPO: 'static + Repo,
    CLIENT: 'static + Client<REPO, MAX_REPOS_PAGE>,
{
    pub fn new(client: CLIENT, config: AnalyzerConfig) -> Self {
        ProfileAnalyzer {
            client: Arc::new(client),
            config,
            _repo_type: PhantomData,
        }
    }

    pub async fn analyze(&self, username: &str) -> Result<ProfileSummary, AnalysisError> {
        self.analyze_at(username, Utc::now()).await
    }

    /// Same as [`ProfileAnalyzer::analyze`] with account age measured at `now`.
    pub async fn analyze_at(&self, username: &str, now: DateTime<Utc>) -> Result<ProfileSummary, AnalysisError> {
        info!("Analyzing {} with {} strategy", username, self.config.strategy);
        let (account, repos) = tokio::join!(
            self.client.account(username),
            self.client.repos(username, MAX_REPOS_PAGE)
        );
        let account = account.map_err(|err| AnalysisError::from_fetch(err, username))?;
        let repos = repos.map_err(|err| AnalysisError::from_fetch(err, username))?;
        debug!("Found {} repositories of {}", repos.len(), account.login);

        let languages = LanguageTally::from_languages(repos.iter().map(Repo::language));
        let tally = self.contributions(&account.login, &repos).await;

        Ok(summarize(&account, &languages, repos.len(), tally, self.config.strategy, now))
    }

    async fn contributions(&self, login: &str, repos: &[REPO]) -> ContributionTally {
        match self.config.strategy {
            ContributionStrategy::Contributors => {
                let resolver = ContributionResolver::new(self.client.clone(), self.config.rate_limit_cooldown);
                BatchScheduler::new(resolver, self.config.batch_size, self.config.batch_delay)
                    .resolve_all(repos, login)
                    .await
            }
            ContributionStrategy::Events => {
                EventsCounter::new(self.client.clone(), self.config.events_max_pages)
                    .count(login)
                    .await
            }
        }
    }
}

fn summarize(
    account: &Account,
    languages: &LanguageTally,
    repo_count: usize,
    tally: ContributionTally,
    source: ContributionStrategy,
    now: DateTime<Utc>,
) -> ProfileSummary {
    let main_language = languages.main_language();
    let main_language_repos = main_language.map_or(0, |language| languages.count(language));
    let age_days = account_age_days(account.created_at, now);
    let commit_frequency = CommitFrequency::classify(commits_per_day(tally.total, age_days));

    ProfileSummary {
        username: account.login.clone(),
        avatar_url: account.avatar_url.clone(),
        main_language: main_language.map(str::to_string),
        commit_frequency,
        repo_count,
        commit_count: tally.total,
        commit_source: source,
        degraded_lookups: tally.degraded,
        followers: account.followers,
        account_age_days: age_days.floor() as u64,
        aura_score: aura_score(repo_count, tally.total, main_language_repos, account.followers),
    }
}

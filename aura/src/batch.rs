use crate::api::{Client, Repo};
use crate::resolver::{ContributionResolver, ContributionTally};
use futures::future::join_all;
use log::{debug, info};
use std::time::Duration;

/// Resolves contributions of repositories in consecutive batches.
///
/// Repositories of one batch are resolved concurrently and the next batch starts only after
/// the whole batch completed and `batch_delay` elapsed.
pub(crate) struct BatchScheduler<REPO, const MAX_REPOS_PAGE: u32, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    resolver: ContributionResolver<REPO, MAX_REPOS_PAGE, CLIENT>,
    batch_size: usize,
    batch_delay: Duration,
}

impl<REPO, const MAX_REPOS_PAGE: u32, CLIENT> BatchScheduler<REPO, MAX_REPOS_PAGE, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    pub fn new(
        resolver: ContributionResolver<REPO, MAX_REPOS_PAGE, CLIENT>,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        BatchScheduler {
            resolver,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    pub async fn resolve_all(&self, repos: &[REPO], login: &str) -> ContributionTally {
        let batch_count = (repos.len() + self.batch_size - 1) / self.batch_size;
        let mut tally = ContributionTally::default();
        for (batch_no, batch) in repos.chunks(self.batch_size).enumerate() {
            let resolutions = join_all(batch.iter().map(|repo| self.resolver.resolve(repo, login))).await;
            let batch_tally: ContributionTally = resolutions.into_iter().collect();
            debug!(
                "Batch {}/{}: {} commits, {} degraded",
                batch_no + 1,
                batch_count,
                batch_tally.total,
                batch_tally.degraded
            );
            tally += batch_tally;

            if batch_no + 1 < batch_count {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
        info!(
            "Resolved {} commits of {} in {} repositories ({} degraded)",
            tally.total,
            login,
            repos.len(),
            tally.degraded
        );
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Failure, MockClient, MockRepo};
    use std::sync::Arc;
    use tokio::time::Instant;

    const LATENCY: Duration = Duration::from_millis(100);
    const DELAY: Duration = Duration::from_secs(1);

    fn repos(count: usize) -> Vec<MockRepo> {
        (0..count)
            .map(|index| MockRepo::new(&format!("octocat/repo_{}", index), Some("Rust")))
            .collect()
    }

    fn scheduler(client: &Arc<MockClient>, batch_size: usize) -> BatchScheduler<MockRepo, 100, MockClient> {
        let resolver = ContributionResolver::new(client.clone(), Duration::from_secs(5));
        BatchScheduler::new(resolver, batch_size, DELAY)
    }

    fn client_with_commits(repos: &[MockRepo], commits: u32) -> MockClient {
        repos.iter().fold(MockClient::default().with_latency(LATENCY), |client, repo| {
            client.with_contributors(repo, Ok(vec![("octocat", commits), ("other", 100)]))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn single_batch_test() {
        let repos = repos(5);
        let client = Arc::new(client_with_commits(&repos, 2));

        let start = Instant::now();
        let tally = scheduler(&client, 5).resolve_all(&repos, "octocat").await;
        let elapsed = start.elapsed();

        assert_eq!(tally, ContributionTally { total: 10, degraded: 0 });
        assert!(elapsed >= LATENCY && elapsed < LATENCY + DELAY, "One batch, no delay");
        assert_eq!(client.max_in_flight(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn trailing_batch_test() {
        let repos = repos(6);
        let client = Arc::new(client_with_commits(&repos, 3));

        let start = Instant::now();
        let tally = scheduler(&client, 5).resolve_all(&repos, "octocat").await;
        let elapsed = start.elapsed();

        assert_eq!(tally, ContributionTally { total: 18, degraded: 0 });
        assert!(
            elapsed >= LATENCY * 2 + DELAY && elapsed < LATENCY * 2 + DELAY * 2,
            "Two batches, one delay in between"
        );
        assert_eq!(client.max_in_flight(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn every_repo_once_in_order_test() {
        let repos = repos(12);
        let client = Arc::new(client_with_commits(&repos, 1));

        let tally = scheduler(&client, 5).resolve_all(&repos, "octocat").await;

        assert_eq!(tally.total, 12);
        let expected: Vec<String> = repos.iter().map(|repo| repo.full_name().to_string()).collect();
        assert_eq!(client.contributor_calls(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_size_bounds_concurrency_test() {
        let repos = repos(9);
        let client = Arc::new(client_with_commits(&repos, 1));

        let tally = scheduler(&client, 3).resolve_all(&repos, "octocat").await;

        assert_eq!(tally.total, 9);
        assert_eq!(client.max_in_flight(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_repos_test() {
        let client = Arc::new(MockClient::default());

        let start = Instant::now();
        let tally = scheduler(&client, 5).resolve_all(&[], "octocat").await;

        assert_eq!(tally, ContributionTally::default());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_sibling_test() {
        let repos = repos(7);
        let client = client_with_commits(&repos, 4).with_contributors(&repos[1], Err(Failure::RateLimited));
        let client = Arc::new(client);

        let tally = scheduler(&client, 5).resolve_all(&repos, "octocat").await;

        assert_eq!(tally, ContributionTally { total: 24, degraded: 1 });
        assert_eq!(client.contributor_calls().len(), 7);
    }
}

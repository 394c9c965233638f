use crate::api::{Client, Contributor, Error, Repo};
use log::{debug, warn};
use std::iter::FromIterator;
use std::ops::AddAssign;
use std::time::Duration;
use std::{marker::PhantomData, sync::Arc};
use strum_macros::Display;

/// Outcome of counting the commits of one account in one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolved(u32),
    Degraded(Degradation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Degradation {
    RateLimited,
    Unavailable,
}

impl Resolution {
    /// Degraded resolutions count as zero.
    pub fn count(&self) -> u32 {
        match self {
            Resolution::Resolved(count) => *count,
            Resolution::Degraded(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionTally {
    pub total: u64,
    pub degraded: usize,
}

impl AddAssign<Resolution> for ContributionTally {
    fn add_assign(&mut self, resolution: Resolution) {
        self.total += u64::from(resolution.count());
        if let Resolution::Degraded(_) = resolution {
            self.degraded += 1;
        }
    }
}

impl AddAssign for ContributionTally {
    fn add_assign(&mut self, other: ContributionTally) {
        self.total += other.total;
        self.degraded += other.degraded;
    }
}

impl FromIterator<Resolution> for ContributionTally {
    fn from_iter<I: IntoIterator<Item = Resolution>>(resolutions: I) -> Self {
        let mut tally = ContributionTally::default();
        resolutions.into_iter().for_each(|resolution| tally += resolution);
        tally
    }
}

pub(crate) struct ContributionResolver<REPO, const MAX_REPOS_PAGE: u32, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    client: Arc<CLIENT>,
    rate_limit_cooldown: Duration,
    _repo_type: PhantomData<REPO>,
}

impl<REPO, const MAX_REPOS_PAGE: u32, CLIENT> ContributionResolver<REPO, MAX_REPOS_PAGE, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    pub fn new(client: Arc<CLIENT>, rate_limit_cooldown: Duration) -> Self {
        ContributionResolver {
            client,
            rate_limit_cooldown,
            _repo_type: PhantomData,
        }
    }

    /// Counts commits of `login` in `repo`. Never fails, every failure degrades to zero.
    ///
    /// Contributors of the repository are asked first. When that gets rate limited the resolver
    /// cools down and gives up on the repository, on any other failure it falls back to the
    /// commits authored by `login`.
    pub async fn resolve(&self, repo: &REPO, login: &str) -> Resolution {
        match self.client.contributors(repo).await {
            Ok(contributors) => Resolution::Resolved(user_contributions(&contributors, login)),
            Err(Error::RateLimited(reason)) => {
                warn!(
                    "Contributors of {} rate limited ({}). Cooling down for {} ms.",
                    repo.full_name(),
                    reason,
                    self.rate_limit_cooldown.as_millis()
                );
                tokio::time::sleep(self.rate_limit_cooldown).await;
                Resolution::Degraded(Degradation::RateLimited)
            }
            Err(err) => {
                debug!("Failed to get contributors of {}: {}", repo.full_name(), err);
                self.resolve_authored_commits(repo, login).await
            }
        }
    }

    async fn resolve_authored_commits(&self, repo: &REPO, login: &str) -> Resolution {
        match self.client.authored_commits(repo, login).await {
            Ok(page) => Resolution::Resolved(page.count()),
            Err(err) => {
                warn!("Failed to get commits of {} in {}: {}", login, repo.full_name(), err);
                Resolution::Degraded(Degradation::Unavailable)
            }
        }
    }
}

fn user_contributions(contributors: &[Contributor], login: &str) -> u32 {
    contributors
        .iter()
        .find(|contributor| contributor.name.eq_ignore_ascii_case(login))
        .map(|contributor| contributor.contributions)
        .unwrap_or(0)
}

use crate::api::{ActivityEvent, Client, Repo};
use crate::resolver::ContributionTally;
use log::{debug, warn};
use std::{marker::PhantomData, sync::Arc};

const EVENTS_PAGE_SIZE: u32 = 100;
const FIRST_PAGE_NUMBER: u32 = 1;

/// Counts commits pushed by an account, as listed in its public events feed.
pub(crate) struct EventsCounter<REPO, const MAX_REPOS_PAGE: u32, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    client: Arc<CLIENT>,
    max_pages: u32,
    _repo_type: PhantomData<REPO>,
}

impl<REPO, const MAX_REPOS_PAGE: u32, CLIENT> EventsCounter<REPO, MAX_REPOS_PAGE, CLIENT>
where
    REPO: Repo,
    CLIENT: Client<REPO, MAX_REPOS_PAGE>,
{
    pub fn new(client: Arc<CLIENT>, max_pages: u32) -> Self {
        EventsCounter {
            client,
            max_pages: max_pages.max(1),
            _repo_type: PhantomData,
        }
    }

    /// Never fails. A failing page ends the walk and is counted as degraded.
    pub async fn count(&self, login: &str) -> ContributionTally {
        let mut tally = ContributionTally::default();
        for page in FIRST_PAGE_NUMBER..FIRST_PAGE_NUMBER + self.max_pages {
            match self.client.public_events(login, page, EVENTS_PAGE_SIZE).await {
                Ok(events) => {
                    let commits = pushed_commits(&events, login);
                    debug!("Events page {}: {} events, {} commits", page, events.len(), commits);
                    tally.total += commits;
                    if events.len() < EVENTS_PAGE_SIZE as usize {
                        break;
                    }
                }
                Err(err) => {
                    warn!("Failed to get events page {} of {}: {}", page, login, err);
                    tally.degraded += 1;
                    break;
                }
            }
        }
        tally
    }
}

fn pushed_commits(events: &[ActivityEvent], login: &str) -> u64 {
    events
        .iter()
        .filter(|event| event.is_push_by(login))
        .map(|event| u64::from(event.commits))
        .sum()
}

use serde::Serialize;
use std::time::Duration;
use strum_macros::{Display, EnumString};

/// How commits of an account are counted.
///
/// Both strategies may report very different numbers for the same account,
/// so the chosen one is reported next to the commit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContributionStrategy {
    /// Contributions listed by each repository's contributors, with authored commits as fallback.
    #[default]
    Contributors,
    /// Commits of push events found in the public events feed of the account.
    Events,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub strategy: ContributionStrategy,
    /// Repositories resolved concurrently.
    pub batch_size: usize,
    /// Pause after a repository lookup got rate limited.
    pub rate_limit_cooldown: Duration,
    /// Pause between two batches.
    pub batch_delay: Duration,
    /// Pages of the public events feed to walk. GitHub serves at most 3 pages of 100.
    pub events_max_pages: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            strategy: ContributionStrategy::default(),
            batch_size: 5,
            rate_limit_cooldown: Duration::from_secs(5),
            batch_delay: Duration::from_secs(1),
            events_max_pages: 3,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_strategy(mut self, strategy: ContributionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_rate_limit_cooldown(mut self, cooldown: Duration) -> Self {
        self.rate_limit_cooldown = cooldown;
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn with_events_max_pages(mut self, pages: u32) -> Self {
        self.events_max_pages = pages.max(1);
        self
    }
}

#[test]
fn strategy_from_str_test() {
    use std::str::FromStr;
    assert_eq!(
        ContributionStrategy::from_str("contributors").unwrap(),
        ContributionStrategy::Contributors
    );
    assert_eq!(ContributionStrategy::from_str("events").unwrap(), ContributionStrategy::Events);
    assert!(ContributionStrategy::from_str("stars").is_err());
    assert_eq!(ContributionStrategy::Events.to_string(), "events");
}

#[test]
fn zero_batch_size_test() {
    let config = AnalyzerConfig::default().with_batch_size(0);
    assert_eq!(config.batch_size, 1);
}

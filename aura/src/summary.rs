use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;
use strum_macros::Display;

use crate::ContributionStrategy;

pub const MAX_AURA_SCORE: u8 = 100;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub username: String,
    pub avatar_url: String,
    pub main_language: Option<String>,
    pub commit_frequency: CommitFrequency,
    pub repo_count: usize,
    pub commit_count: u64,
    pub commit_source: ContributionStrategy,
    /// Lookups which failed and were counted as zero commits.
    pub degraded_lookups: usize,
    pub followers: u32,
    pub account_age_days: u64,
    pub aura_score: u8,
}

impl Display for ProfileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "user: {}\taura: {}/{}\tlanguage: {}\tfrequency: {} {}\trepos: {}\tcommits: {} ({})\tfollowers: {}\tage: {} days",
            self.username,
            self.aura_score,
            MAX_AURA_SCORE,
            self.main_language.as_deref().unwrap_or("None"),
            self.commit_frequency,
            self.commit_frequency.emoji(),
            self.repo_count,
            self.commit_count,
            self.commit_source,
            self.followers,
            self.account_age_days
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum CommitFrequency {
    Grindset,
    Consistent,
    Casual,
    Ghost,
}

impl CommitFrequency {
    pub fn classify(commits_per_day: f64) -> Self {
        if commits_per_day > 5.0 {
            CommitFrequency::Grindset
        } else if commits_per_day > 1.0 {
            CommitFrequency::Consistent
        } else if commits_per_day > 0.1 {
            CommitFrequency::Casual
        } else {
            CommitFrequency::Ghost
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CommitFrequency::Grindset => "💪",
            CommitFrequency::Consistent => "🚀",
            CommitFrequency::Casual => "😎",
            CommitFrequency::Ghost => "👻",
        }
    }
}

/// Number of repositories per language, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    counts: Vec<(String, u32)>,
}

impl LanguageTally {
    pub fn from_languages<'a, I>(languages: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut tally = LanguageTally::default();
        languages.into_iter().flatten().for_each(|language| tally.add(language));
        tally
    }

    pub fn add(&mut self, language: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((language.to_string(), 1)),
        }
    }

    pub fn count(&self, language: &str) -> u32 {
        self.counts
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Language with the highest count. On a tie the language seen first wins.
    pub fn main_language(&self) -> Option<&str> {
        let mut main: Option<&(String, u32)> = None;
        for entry in &self.counts {
            if main.map_or(true, |(_, max)| entry.1 > *max) {
                main = Some(entry);
            }
        }
        main.map(|(name, _)| name.as_str())
    }
}

/// Fractional days between account creation and `now`, never negative.
pub fn account_age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(0.0)
}

pub fn commits_per_day(commit_count: u64, account_age_days: f64) -> f64 {
    commit_count as f64 / account_age_days.max(1.0)
}

/// Saturates at [`MAX_AURA_SCORE`].
pub fn aura_score(repo_count: usize, commit_count: u64, main_language_repos: u32, followers: u32) -> u8 {
    let score = repo_count as f64 * 1.5
        + commit_count as f64 * 0.5
        + f64::from(main_language_repos) * 2.0
        + f64::from(followers) * 0.2;
    score.min(f64::from(MAX_AURA_SCORE)).max(0.0).floor() as u8
}

//! GitHub profile aura estimation
//!
//! # Overview
//!
//! The aura is a bounded synthetic score (0 - 100) describing how "active" a GitHub account looks.
//! Given a username, the library fetches the account record and its repositories (at most one page of 100,
//! most recently updated first) and counts how many commits the account contributed to each of them.
//! Commit counts are resolved in small batches with a pause in between, because GitHub enforces a rate limit
//! that is not known upfront. A repository whose count cannot be resolved contributes zero, so the final
//! commit count is a lower bound rather than a hard failure.
//!
//! The resulting [`ProfileSummary`] carries the main language, a commit frequency band and the aura score:
//!
//! `aura = floor(min(100, repos * 1.5 + commits * 0.5 + main_language_repos * 2 + followers * 0.2))`

#[cfg(feature = "analyzer")]
mod analyzer;
#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "analyzer")]
mod batch;
mod config;
#[cfg(feature = "analyzer")]
mod events;
#[cfg(feature = "analyzer")]
mod resolver;
mod summary;
#[cfg(all(test, feature = "analyzer"))]
mod testing;

#[cfg(feature = "analyzer")]
pub use analyzer::{AnalysisError, ProfileAnalyzer};
pub use config::{AnalyzerConfig, ContributionStrategy};
#[cfg(feature = "analyzer")]
pub use resolver::{ContributionTally, Degradation, Resolution};
pub use summary::{CommitFrequency, LanguageTally, ProfileSummary};

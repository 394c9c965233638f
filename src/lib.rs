mod args;

use aura::api::{Commentator, StaticCommentator};
use aura::{AnalyzerConfig, ProfileAnalyzer, ProfileSummary};
use gemini_client::GeminiClientBuilder;
use github_client::{GithubClient, GithubClientBuilder, GithubRepo, MAX_REPOS_PAGE};
use log::{error, info};
use std::fmt::Display;
use std::time::Duration;

pub use args::Args;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: ProfileSummary,
    pub commentary: String,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = serde_json::json!({
            "summary": serde_json::to_value(&self.summary)?,
            "commentary": self.commentary,
        });
        serde_json::to_string_pretty(&report)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}\nvibe check: \"{}\"", self.summary, self.commentary))
    }
}

pub async fn analyze_profile(args: Args) -> anyhow::Result<Report> {
    let Args {
        username,
        api_token,
        api_url,
        strategy,
        batch_size,
        rate_limit_cooldown_ms,
        batch_delay_ms,
        events_max_pages,
        request_timeout_secs,
        gemini_api_key,
        gemini_url,
        gemini_model,
        json: _,
    } = args;
    let timeout = request_timeout_secs.map(Duration::from_secs);

    let mut client = GithubClientBuilder::default().with_github_url(api_url);
    if let Some(token) = api_token {
        client = client.try_with_token(token)?;
    }
    if let Some(timeout) = timeout {
        client = client.with_timeout(timeout);
    }
    let client = client.build()?;

    let config = AnalyzerConfig::default()
        .with_strategy(strategy)
        .with_batch_size(batch_size)
        .with_rate_limit_cooldown(Duration::from_millis(rate_limit_cooldown_ms))
        .with_batch_delay(Duration::from_millis(batch_delay_ms))
        .with_events_max_pages(events_max_pages);
    let analyzer: ProfileAnalyzer<GithubRepo, MAX_REPOS_PAGE, GithubClient> = ProfileAnalyzer::new(client, config);
    let summary = analyzer.analyze(&username).await?;

    let commentator: Box<dyn Commentator> = match gemini_api_key {
        Some(api_key) => {
            let mut gemini = GeminiClientBuilder::new(api_key)
                .with_gemini_url(gemini_url)
                .with_model(gemini_model);
            if let Some(timeout) = timeout {
                gemini = gemini.with_timeout(timeout);
            }
            match gemini.build() {
                Ok(gemini) => Box::new(gemini),
                Err(err) => {
                    error!("Failed to set up Gemini client, skipping roast generation: {:#}", err);
                    Box::new(StaticCommentator)
                }
            }
        }
        None => {
            info!("No Gemini API key configured, skipping roast generation");
            Box::new(StaticCommentator)
        }
    };
    let commentary = commentator.generate_commentary(&summary).await;

    Ok(Report { summary, commentary })
}

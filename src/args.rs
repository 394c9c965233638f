use aura::ContributionStrategy;
use clap::Parser;
use secrecy::SecretString;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub username to analyze
    #[clap(short, long, env = "GITHUB_USERNAME")]
    pub username: String,

    /// GitHub API access token, sent as a bearer token
    #[clap(short = 't', long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// GitHub API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// How commits are counted: `contributors` or `events`
    #[clap(short, long, env, default_value = "contributors")]
    pub strategy: ContributionStrategy,

    /// Repositories resolved in parallel
    #[clap(long, env, default_value_t = 5, parse(try_from_str=batch_size_in_range))]
    pub batch_size: usize,

    /// Pause after a rate limited repository lookup
    #[clap(long, env, default_value_t = 5000)]
    pub rate_limit_cooldown_ms: u64,

    /// Pause between batches of repositories
    #[clap(long, env, default_value_t = 1000)]
    pub batch_delay_ms: u64,

    /// Pages of public events to walk with the `events` strategy
    #[clap(long, env, default_value_t = 3, parse(try_from_str=events_max_pages_in_range))]
    pub events_max_pages: u32,

    /// Deadline of a single HTTP request
    #[clap(long, env)]
    pub request_timeout_secs: Option<u64>,

    /// Gemini API key. Without it a canned roast is printed
    #[clap(long, env)]
    pub gemini_api_key: Option<SecretString>,

    /// Gemini API URL
    #[clap(long, env, default_value = "https://generativelanguage.googleapis.com")]
    pub gemini_url: String,

    #[clap(long, env, default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// Print the report as JSON
    #[clap(long)]
    pub json: bool,
}

fn batch_size_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, 100, "batch_size".to_string())
}

fn events_max_pages_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, 10, "events_max_pages".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn number_in_range_test() {
    assert_eq!(batch_size_in_range("5"), Ok(5));
    assert!(batch_size_in_range("0").is_err());
    assert!(batch_size_in_range("five").is_err());
    assert_eq!(events_max_pages_in_range("10"), Ok(10));
    assert!(events_max_pages_in_range("11").is_err());
}

#[test]
fn defaults_test() {
    let args = Args::try_parse_from(["github_aura", "--username", "octocat"]).unwrap();
    assert_eq!(args.username, "octocat");
    assert_eq!(args.strategy, ContributionStrategy::Contributors);
    assert_eq!(args.batch_size, 5);
    assert_eq!(args.rate_limit_cooldown_ms, 5000);
    assert_eq!(args.batch_delay_ms, 1000);
    assert_eq!(args.events_max_pages, 3);
    assert!(!args.json);
}

#[test]
fn strategy_test() {
    let args = Args::try_parse_from(["github_aura", "-u", "octocat", "--strategy", "events"]).unwrap();
    assert_eq!(args.strategy, ContributionStrategy::Events);
    assert!(Args::try_parse_from(["github_aura", "-u", "octocat", "--strategy", "stars"]).is_err());
}

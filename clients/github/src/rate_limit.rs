use derive_more::Constructor;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::RETRY_AFTER;
use std::str::FromStr;

/// Rate limit state reported by GitHub along a rejected request.
#[derive(Constructor, Debug, PartialEq, Eq)]
pub(crate) struct RateLimit {
    limit: Option<u32>,
    remaining: Option<u32>,
    reset: Option<i64>,
    retry_after: Option<u64>,
}

impl RateLimit {
    pub(crate) fn from_headers(headers: &HeaderMap<HeaderValue>) -> Self {
        RateLimit {
            limit: read_header(headers, "x-ratelimit-limit"),
            remaining: read_header(headers, "x-ratelimit-remaining"),
            reset: read_header(headers, "x-ratelimit-reset"),
            retry_after: read_header(headers, RETRY_AFTER.as_str()),
        }
    }

    /// Human readable hint on when requests may succeed again, `now` being a unix timestamp.
    pub(crate) fn describe(&self, now: i64) -> String {
        match (self.retry_after, self.reset) {
            (Some(retry_after), _) => format!("retry after {} s", retry_after),
            (None, Some(reset)) => format!(
                "{} of {} requests remaining, resets in {} s",
                self.remaining.unwrap_or(0),
                self.limit.map_or_else(|| "?".to_string(), |limit| limit.to_string()),
                std::cmp::max(reset - now, 0)
            ),
            (None, None) => "quota exhausted".to_string(),
        }
    }
}

fn read_header<T: FromStr>(headers: &HeaderMap<HeaderValue>, header: &str) -> Option<T> {
    headers.get(header)?.to_str().ok()?.trim().parse::<T>().ok()
}

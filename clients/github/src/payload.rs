use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub created_at: DateTime<Utc>,
    pub followers: u32,
    pub avatar_url: String,
}

impl From<User> for aura::api::Account {
    fn from(user: User) -> Self {
        aura::api::Account::new(user.login, user.created_at, user.followers, user.avatar_url)
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub full_name: String,
    pub language: Option<String>,
}

impl From<Repo> for crate::GithubRepo {
    fn from(repo: Repo) -> Self {
        crate::GithubRepo::new(repo.full_name, repo.language)
    }
}

#[derive(Deserialize, Debug)]
pub struct Contributor {
    pub login: String,
    pub contributions: u32,
}

impl From<Contributor> for aura::api::Contributor {
    fn from(contributor: Contributor) -> Self {
        aura::api::Contributor::new(contributor.login, contributor.contributions)
    }
}

#[derive(Deserialize, Debug)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: Actor,
    pub payload: Option<PushPayload>,
}

#[derive(Deserialize, Debug)]
pub struct Actor {
    pub login: String,
}

/// Only push events carry these fields, for other events both are absent.
#[derive(Deserialize, Debug, Default)]
pub struct PushPayload {
    pub size: Option<u32>,
    pub commits: Option<Vec<IgnoredAny>>,
}

impl PushPayload {
    fn commit_count(&self) -> u32 {
        self.size
            .or_else(|| self.commits.as_ref().map(|commits| commits.len() as u32))
            .unwrap_or(0)
    }
}

impl From<Event> for aura::api::ActivityEvent {
    fn from(event: Event) -> Self {
        let commits = event.payload.map_or(0, |payload| payload.commit_count());
        aura::api::ActivityEvent::new(event.kind, event.actor.login, commits)
    }
}

#[test]
fn push_event_test() {
    let event: Event = serde_json::from_str(
        r#"{
            "id": "1",
            "type": "PushEvent",
            "actor": { "id": 1, "login": "octocat" },
            "repo": { "name": "octocat/hello" },
            "payload": { "push_id": 2, "size": 3, "commits": [{}, {}, {}] }
        }"#,
    )
    .unwrap();
    let event = aura::api::ActivityEvent::from(event);
    assert_eq!(event.commits, 3);
    assert!(event.is_push_by("octocat"));
}

#[test]
fn push_event_without_size_test() {
    let event: Event = serde_json::from_str(
        r#"{ "type": "PushEvent", "actor": { "login": "octocat" }, "payload": { "commits": [{}, {}] } }"#,
    )
    .unwrap();
    assert_eq!(aura::api::ActivityEvent::from(event).commits, 2);
}

#[test]
fn other_event_test() {
    let event: Event = serde_json::from_str(
        r#"{ "type": "WatchEvent", "actor": { "login": "octocat" }, "payload": { "action": "started" } }"#,
    )
    .unwrap();
    let event = aura::api::ActivityEvent::from(event);
    assert_eq!(event.commits, 0);
    assert!(!event.is_push_by("octocat"));
}

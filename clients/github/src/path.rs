use aura::api::{Error, Result};

const MAX_LOGIN_LENGTH: usize = 39;

/// `/users/{login}{resource}`. A login outside GitHub's grammar cannot exist, so it is not found.
pub(crate) fn user_path(login: &str, resource: &str) -> Result<String> {
    if !is_login(login) {
        return Err(Error::NotFound(format!("{:?} is not a GitHub login", login)));
    }
    Ok(format!("/users/{}{}", login, resource))
}

/// `/repos/{owner}/{name}{resource}` for a `full_name` of `owner/name`.
pub(crate) fn repo_path(full_name: &str, resource: &str) -> Result<String> {
    match full_name.split_once('/') {
        Some((owner, name)) if is_login(owner) && is_repo_name(name) => {
            Ok(format!("/repos/{}/{}{}", owner, name, resource))
        }
        _ => Err(Error::NotFound(format!("{:?} is not a GitHub repository", full_name))),
    }
}

/// 1 to 39 ASCII alphanumerics or hyphens.
fn is_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= MAX_LOGIN_LENGTH
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_repo_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[test]
fn user_path_test() {
    assert_eq!(user_path("octocat", "").unwrap(), "/users/octocat");
    assert_eq!(user_path("Octo-Cat-2", "/repos").unwrap(), "/users/Octo-Cat-2/repos");
    assert_eq!(user_path(&"a".repeat(39), "").unwrap(), format!("/users/{}", "a".repeat(39)));
}

#[test]
fn invalid_login_test() {
    let too_long = "a".repeat(40);
    for login in ["", "nobody/../octocat", "octocat?x=1", "octo#cat", "octo cat", "octocät", too_long.as_str()] {
        let err = user_path(login, "/repos").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "{}: {:?}", login, err);
    }
}

#[test]
fn repo_path_test() {
    assert_eq!(
        repo_path("octocat/hello.world_2-x", "/contributors").unwrap(),
        "/repos/octocat/hello.world_2-x/contributors"
    );
    for full_name in ["octocat", "octocat/", "octocat/..", "octocat/a/b", "../a", "octocat/a?b", "octocat/a#b"] {
        assert!(matches!(repo_path(full_name, "/commits"), Err(Error::NotFound(_))), "{}", full_name);
    }
}

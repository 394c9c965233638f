use reqwest::header::{HeaderMap, HeaderValue, LINK};
use url::Url;

/// Page number of the `rel="last"` target of a `Link` header.
pub(crate) fn last_page(headers: &HeaderMap<HeaderValue>) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_last_page(link)
}

fn parse_last_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if !parts.any(|param| param.trim() == r#"rel="last""#) {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        let page = url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value.into_owned())?;
        page.parse().ok()
    })
}

#[test]
fn last_page_test() {
    let link = r#"<https://api.github.com/repositories/1/commits?author=octocat&per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/commits?author=octocat&per_page=1&page=241>; rel="last""#;
    assert_eq!(parse_last_page(link), Some(241));
}

#[test]
fn no_last_page_test() {
    let link = r#"<https://api.github.com/repositories/1/commits?page=1>; rel="prev", <https://api.github.com/repositories/1/commits?page=1>; rel="first""#;
    assert_eq!(parse_last_page(link), None);
}

#[test]
fn malformed_link_test() {
    assert_eq!(parse_last_page(""), None);
    assert_eq!(parse_last_page(r#"https://api.github.com/x?page=3; rel="last""#), None);
    assert_eq!(parse_last_page(r#"<https://api.github.com/x?page=three>; rel="last""#), None);
    assert_eq!(parse_last_page(r#"</relative?page=3>; rel="last""#), None);
}

#[test]
fn missing_header_test() {
    assert_eq!(last_page(&HeaderMap::new()), None);

    let mut headers = HeaderMap::new();
    headers.insert(
        LINK,
        HeaderValue::from_static(r#"<https://api.github.com/user/1/repos?page=4>; rel="last""#),
    );
    assert_eq!(last_page(&headers), Some(4));
}

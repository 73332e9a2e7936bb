//! URL helpers: username derivation and absolute URL construction

use url::Url;

use crate::page::PageAdapter;

/// First path segments that never name a user
pub const RESERVED_SEGMENTS: &[&str] = &["home", "explore", "i"];

/// Username from a page path such as `/openai/status/1`
pub fn username_from_path(pathname: &str) -> Option<String> {
    let segment = first_segment(pathname)?;
    if RESERVED_SEGMENTS.contains(&segment) {
        return None;
    }
    Some(segment.to_string())
}

/// Username from a profile link href such as `/openai`
///
/// Only root-relative hrefs are accepted.
pub fn username_from_href(href: &str) -> Option<String> {
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }
    first_segment(href).map(str::to_string)
}

/// Username from the current path, else from the page's profile link
pub fn resolve_username<P: PageAdapter>(page: &P) -> Option<String> {
    let location = page.location();
    username_from_path(&location.pathname)
        .or_else(|| page.profile_link_href().and_then(|href| username_from_href(&href)))
}

/// Absolute URL for a root-relative path on the given origin
pub fn absolute_url(origin: &str, path: &str) -> String {
    match Url::parse(origin).and_then(|base| base.join(path)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Could not join {} onto {}: {}", path, origin, e);
            format!("{}{}", origin.trim_end_matches('/'), path)
        }
    }
}

fn first_segment(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.strip_prefix('/')?
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;

    #[test]
    fn test_username_from_path() {
        assert_eq!(username_from_path("/openai"), Some("openai".to_string()));
        assert_eq!(
            username_from_path("/openai/status/123"),
            Some("openai".to_string())
        );
        assert_eq!(username_from_path("/home"), None);
        assert_eq!(username_from_path("/explore/tabs/for_you"), None);
        assert_eq!(username_from_path("/i/bookmarks"), None);
        assert_eq!(username_from_path("/"), None);
        assert_eq!(username_from_path(""), None);
    }

    #[test]
    fn test_username_from_href() {
        assert_eq!(username_from_href("/jack"), Some("jack".to_string()));
        assert_eq!(username_from_href("/jack?lang=en"), Some("jack".to_string()));
        assert_eq!(username_from_href("https://x.com/jack"), None);
        assert_eq!(username_from_href("//x.com/jack"), None);
        assert_eq!(username_from_href("/"), None);
    }

    #[test]
    fn test_resolve_prefers_path() {
        let mut page = MemoryPage::new("https://x.com/openai").unwrap();
        page.set_profile_link(Some("/jack"));
        assert_eq!(resolve_username(&page), Some("openai".to_string()));
    }

    #[test]
    fn test_resolve_falls_back_to_profile_link() {
        let mut page = MemoryPage::new("https://x.com/home").unwrap();
        assert_eq!(resolve_username(&page), None);

        page.set_profile_link(Some("/jack"));
        assert_eq!(resolve_username(&page), Some("jack".to_string()));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://x.com", "/openai"),
            "https://x.com/openai"
        );
        assert_eq!(
            absolute_url("https://x.com", "/i/grok"),
            "https://x.com/i/grok"
        );
        assert_eq!(
            absolute_url("https://x.com", "/a/status/1"),
            "https://x.com/a/status/1"
        );
    }

    #[test]
    fn test_absolute_url_with_unparseable_origin() {
        assert_eq!(absolute_url("null", "/home"), "null/home");
    }
}

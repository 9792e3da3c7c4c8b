#![forbid(unsafe_code)]

//! Route and query-string helpers.

use url::form_urlencoded;

/// Whether `path` is the landing page.
///
/// The landing page is the empty path, `/`, `/index`, or any path ending in
/// `/index.html`.
pub fn is_home_path(path: &str) -> bool {
    matches!(path, "" | "/" | "/index") || path.ends_with("/index.html")
}

/// First value of the query parameter `name` in `search`.
///
/// `search` may carry its leading `?`. Values are percent-decoded, with `+`
/// read as a space.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_paths() {
        for path in ["", "/", "/index", "/index.html", "/site/index.html"] {
            assert!(is_home_path(path), "{path:?} should be home");
        }
    }

    #[test]
    fn non_home_paths() {
        for path in ["/about.html", "/index.htm", "/indexes", "/portfolio-details.html"] {
            assert!(!is_home_path(path), "{path:?} should not be home");
        }
    }

    #[test]
    fn query_param_reads_first_match() {
        assert_eq!(
            query_param("?id=ajay-sweety&id=other", "id").as_deref(),
            Some("ajay-sweety")
        );
    }

    #[test]
    fn query_param_without_question_mark() {
        assert_eq!(query_param("tab=x&id=rohan-meera", "id").as_deref(), Some("rohan-meera"));
    }

    #[test]
    fn query_param_decodes() {
        assert_eq!(query_param("?id=a%20b+c", "id").as_deref(), Some("a b c"));
    }

    #[test]
    fn query_param_missing() {
        assert_eq!(query_param("", "id"), None);
        assert_eq!(query_param("?other=1", "id"), None);
    }
}

//! Pure helpers for request URIs.

use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Everything before the first `?`.
pub fn strip_query(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(path, _)| path)
}

/// Everything after the first `?`, if there is a query string.
pub fn query_string(uri: &str) -> Option<&str> {
    uri.split_once('?').map(|(_, query)| query)
}

/// Normalizes a request URI to the form routes are matched against.
///
/// The query string is dropped, the result has exactly one leading `/`, and
/// trailing slashes are removed unless the path is the root.
///
/// ```rust,ignore
/// assert_eq!(normalize_uri("/a/b/"), "/a/b");
/// assert_eq!(normalize_uri("a"), "/a");
/// assert_eq!(normalize_uri("/a?x=1"), "/a");
/// ```
pub fn normalize_uri(uri: &str) -> String {
    normalize_path(strip_query(uri))
}

/// Normalizes the slashes of a path that has no query string left.
///
/// Unlike [`normalize_uri`] a `?` is kept, so a decoded `%3F` stays part of
/// its segment.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Splits a path on `/`, discarding empty components.
///
/// The root path yields no segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Percent-decodes a path. Invalid UTF-8 is replaced, `+` is kept as is.
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Parses the form-urlencoded query string of `uri`. Later duplicates win.
pub fn parse_query(uri: &str) -> BTreeMap<String, String> {
    query_string(uri)
        .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_uri() {
        assert_eq!(normalize_uri("/a/b/"), "/a/b");
        assert_eq!(normalize_uri("/"), "/");
        assert_eq!(normalize_uri(""), "/");
        assert_eq!(normalize_uri("a"), "/a");
        assert_eq!(normalize_uri("/a?x=1"), "/a");
        assert_eq!(normalize_uri("//a//"), "/a");
        assert_eq!(normalize_uri("/?page=2"), "/");
    }

    proptest! {
        #[test]
        fn normalize_uri_is_idempotent(uri in "[a-z/?=&]{0,24}") {
            let once = normalize_uri(&uri);
            prop_assert_eq!(normalize_uri(&once), once.clone());
            prop_assert!(once.starts_with('/'));
            prop_assert!(once == "/" || !once.ends_with('/'));
            prop_assert!(!once.contains('?'));
        }

        #[test]
        fn segments_are_never_empty(path in "[a-z/]{0,24}") {
            prop_assert!(segments(&path).iter().all(|s| !s.is_empty()));
            let normalized = normalize_uri(&path);
            prop_assert_eq!(segments(&normalized), segments(&path));
        }
    }

    #[test]
    fn test_normalize_path_keeps_question_mark() {
        assert_eq!(normalize_path("/search/what?/"), "/search/what?");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_segments() {
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
        assert_eq!(segments("/a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(segments("/a//b/"), vec!["a", "b"]);
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/blog/hello%20world"), "/blog/hello world");
        assert_eq!(decode_path("/caf%C3%A9"), "/café");
        assert_eq!(decode_path("/a+b"), "/a+b");
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("/search?q=rust+lang&page=2&page=3");
        assert_eq!(query.get("q").map(String::as_str), Some("rust lang"));
        assert_eq!(query.get("page").map(String::as_str), Some("3"));
        assert!(parse_query("/no-query").is_empty());
    }
}

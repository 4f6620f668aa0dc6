//! The deployment prefix an application is served under.

use crate::config::ConfigError;
use std::fmt;

/// A validated URL prefix such as `/cms`, or empty when served from `/`.
///
/// Stored without a trailing slash and always with a leading one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    /// Validates and normalizes a prefix. `""` and `"/"` mean no prefix.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.contains(['?', '#', '{', '}']) {
            return Err(ConfigError::InvalidBasePath(raw.to_string()));
        }
        let inner = trimmed.trim_matches('/');
        if inner.is_empty() {
            Ok(Self::root())
        } else {
            Ok(Self(format!("/{inner}")))
        }
    }

    /// No prefix.
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Derives the prefix from a front controller's script path:
    /// `/cms/index.php` gives `/cms`, `/index.php` gives no prefix.
    pub fn from_script_name(script_name: &str) -> Result<Self, ConfigError> {
        let normalized = script_name.replace('\\', "/");
        match normalized.rsplit_once('/') {
            Some((dir, _)) => Self::new(dir),
            None => Ok(Self::root()),
        }
    }

    /// The prefix, empty for the root.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the application is served from `/`.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefixes `path` with the base path. A path that already carries the
    /// prefix, compared the same way [`BasePath::strip`] compares it, is
    /// returned unchanged.
    pub fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if self.is_root() || self.prefix_len(&path).is_some() {
            path
        } else {
            format!("{}{path}", self.0)
        }
    }

    /// Removes the prefix from a request path. The comparison ignores ASCII
    /// case and only succeeds at a segment boundary, so `/cms` strips
    /// `/CMS/about` but not `/cmsx/about`.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        match self.prefix_len(path) {
            Some(len) => &path[len..],
            None => path,
        }
    }

    fn prefix_len(&self, path: &str) -> Option<usize> {
        if self.is_root() {
            return None;
        }
        let len = self.0.len();
        let head = path.get(..len)?;
        let rest = &path[len..];
        (head.eq_ignore_ascii_case(&self.0) && (rest.is_empty() || rest.starts_with('/')))
            .then_some(len)
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        assert_eq!(BasePath::new("").unwrap().as_str(), "");
        assert_eq!(BasePath::new("/").unwrap().as_str(), "");
        assert_eq!(BasePath::new("cms/").unwrap().as_str(), "/cms");
        assert_eq!(BasePath::new("/sites/cms//").unwrap().as_str(), "/sites/cms");
    }

    #[test]
    fn test_new_rejects_query_and_braces() {
        assert!(matches!(BasePath::new("/cms?x"), Err(ConfigError::InvalidBasePath(_))));
        assert!(matches!(BasePath::new("/{site}"), Err(ConfigError::InvalidBasePath(_))));
    }

    #[test]
    fn test_from_script_name() {
        assert_eq!(BasePath::from_script_name("/cms/index.php").unwrap().as_str(), "/cms");
        assert!(BasePath::from_script_name("/index.php").unwrap().is_root());
        assert!(BasePath::from_script_name("index.php").unwrap().is_root());
        assert_eq!(BasePath::from_script_name("\\zed\\index.php").unwrap().as_str(), "/zed");
    }

    #[test]
    fn test_url_prefixes_once() {
        let base = BasePath::new("/cms").unwrap();
        assert_eq!(base.url("/admin/login"), "/cms/admin/login");
        assert_eq!(base.url("admin"), "/cms/admin");
        assert_eq!(base.url(&base.url("/admin")), "/cms/admin");
        assert_eq!(base.url("/cms"), "/cms");
        assert_eq!(base.url("/cmsx"), "/cms/cmsx");
        assert_eq!(BasePath::root().url("about"), "/about");
    }

    #[test]
    fn test_url_and_strip_agree_on_case() {
        let base = BasePath::new("/cms").unwrap();
        assert_eq!(base.url("/CMS/x"), "/CMS/x");
        assert_eq!(base.strip(&base.url("/CMS/x")), "/x");
        assert_eq!(base.url("/CMSx"), "/cms/CMSx");
    }

    #[test]
    fn test_strip_at_segment_boundary() {
        let base = BasePath::new("/ZedCMS").unwrap();
        assert_eq!(base.strip("/zedcms/blog"), "/blog");
        assert_eq!(base.strip("/ZedCMS"), "");
        assert_eq!(base.strip("/zedcmsx/blog"), "/zedcmsx/blog");
        assert_eq!(base.strip("/z"), "/z");
        assert_eq!(BasePath::root().strip("/blog"), "/blog");
    }
}

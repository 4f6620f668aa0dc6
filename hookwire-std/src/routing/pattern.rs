//! Route patterns with `{name}` placeholders.

use super::uri::segments;
use hookwire_core::{Params, PatternError};
use std::fmt;

/// One `/`-delimited piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly (case-sensitive).
    Literal(String),
    /// Captures the path segment under this name.
    Placeholder(String),
}

/// A compiled route pattern such as `/blog/{year}/{slug}`.
///
/// Patterns are validated once, when the route is registered, so a
/// malformed pattern never reaches dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Braces that do not wrap a whole segment, empty or non-identifier
    /// placeholder names, and repeated names are rejected.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut compiled = Vec::new();
        for raw in segments(pattern) {
            let segment = parse_segment(pattern, raw)?;
            if let Segment::Placeholder(name) = &segment {
                let taken = compiled
                    .iter()
                    .any(|s| matches!(s, Segment::Placeholder(n) if n == name));
                if taken {
                    return Err(PatternError::DuplicatePlaceholder {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
            }
            compiled.push(segment);
        }
        Ok(Self {
            source: pattern.to_string(),
            segments: compiled,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in pattern order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True if the pattern has no placeholders.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Matches a normalized path.
    ///
    /// Returns `None` when the path does not match, and `Some` with the
    /// captures (possibly none) when it does.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = segments(path);
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(name) => params.insert(name.as_str(), part),
            }
        }
        Some(params)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Matches `path` against an uncompiled pattern.
///
/// A pattern that fails to compile matches nothing.
pub fn match_pattern(pattern: &str, path: &str) -> Option<Params> {
    Pattern::parse(pattern).ok()?.matches(path)
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, PatternError> {
    let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
        if raw.contains(['{', '}']) {
            return Err(PatternError::UnbalancedBrace {
                pattern: pattern.to_string(),
                segment: raw.to_string(),
            });
        }
        return Ok(Segment::Literal(raw.to_string()));
    };
    if name.is_empty() {
        return Err(PatternError::EmptyPlaceholder {
            pattern: pattern.to_string(),
        });
    }
    if name.contains(['{', '}']) {
        return Err(PatternError::UnbalancedBrace {
            pattern: pattern.to_string(),
            segment: raw.to_string(),
        });
    }
    if !is_identifier(name) {
        return Err(PatternError::InvalidPlaceholder {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(Segment::Placeholder(name.to_string()))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_captures() {
        let params = match_pattern("/user/{id}", "/user/123").unwrap();
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_segment_count_mismatch() {
        assert_eq!(match_pattern("/user/{id}", "/user"), None);
        assert_eq!(match_pattern("/user/{id}", "/user/1/edit"), None);
    }

    #[test]
    fn test_static_match_is_empty_not_none() {
        let params = match_pattern("/a/b", "/a/b");
        assert_eq!(params, Some(Params::new()));
        assert_eq!(match_pattern("/a/b", "/a/c"), None);
        assert_eq!(match_pattern("/", "/"), Some(Params::new()));
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        assert_eq!(match_pattern("/About", "/about"), None);
    }

    #[test]
    fn test_multiple_placeholders() {
        let pattern = Pattern::parse("/blog/{year}/{slug}").unwrap();
        let params = pattern.matches("/blog/2024/hello-world").unwrap();
        assert_eq!(params.get("year"), Some("2024"));
        assert_eq!(params.get("slug"), Some("hello-world"));
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["year", "slug"]);
        assert!(!pattern.is_static());
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert!(matches!(
            Pattern::parse("/user/{id"),
            Err(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            Pattern::parse("/user/id}"),
            Err(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            Pattern::parse("/user/x{id}"),
            Err(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            Pattern::parse("/user/{{id}}"),
            Err(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            Pattern::parse("/user/{}"),
            Err(PatternError::EmptyPlaceholder { .. })
        ));
        assert!(matches!(
            Pattern::parse("/user/{1st}"),
            Err(PatternError::InvalidPlaceholder { .. })
        ));
        assert_eq!(
            Pattern::parse("/{id}/edit/{id}"),
            Err(PatternError::DuplicatePlaceholder {
                pattern: "/{id}/edit/{id}".into(),
                name: "id".into(),
            })
        );
    }

    #[test]
    fn test_malformed_pattern_matches_nothing() {
        assert_eq!(match_pattern("/user/{id", "/user/{id"), None);
    }
}

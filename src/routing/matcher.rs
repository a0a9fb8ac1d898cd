//! Bypass path matching.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive)
//! - Flag paths that look like file requests (contain a `.`)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes are plain `starts_with`, not segment-aware
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PathMatcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches any path containing a `.`.
///
/// Heuristic for "has a file extension". It also catches segments that carry
/// a dot for other reasons (`/v1.2/notes`); those are left unrewritten too.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtensionMatcher;

impl PathMatcher for FileExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        path.contains('.')
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn PathMatcher>>) -> Self {
        Self { matchers }
    }

    /// Bypass rules: every configured prefix plus the file-extension heuristic.
    pub fn bypass<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matchers: Vec<Box<dyn PathMatcher>> = prefixes
            .into_iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p)) as Box<dyn PathMatcher>)
            .collect();
        matchers.push(Box::new(FileExtensionMatcher));
        Self { matchers }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl PathMatcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        // Any matcher may claim the path (OR)
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches("/api/v1/jobs"));
        assert!(matcher.matches("/api"));
        // Plain prefix, not segment-aware
        assert!(matcher.matches("/apiary"));
        assert!(!matcher.matches("/en/affiliate/api"));
        // Case sensitive
        assert!(!matcher.matches("/API/v1"));
    }

    #[test]
    fn test_file_extension_matcher() {
        let matcher = FileExtensionMatcher;

        assert!(matcher.matches("/favicon.ico"));
        assert!(matcher.matches("/en/affiliate/sitemap.xml"));
        assert!(matcher.matches("/v1.2/notes"));
        assert!(!matcher.matches("/en/affiliate/blog"));
        assert!(!matcher.matches("/"));
    }

    #[test]
    fn test_any_matcher() {
        let matcher = AnyMatcher::bypass(["/_next", "/api"]);
        assert_eq!(matcher.len(), 3);

        assert!(matcher.matches("/_next/data/build"));
        assert!(matcher.matches("/api/ping"));
        assert!(matcher.matches("/robots.txt"));
        assert!(!matcher.matches("/jobs"));
    }

    #[test]
    fn test_empty_any_matcher_never_matches() {
        let matcher = AnyMatcher::default();
        assert!(matcher.is_empty());
        assert!(!matcher.matches("/anything"));
    }
}

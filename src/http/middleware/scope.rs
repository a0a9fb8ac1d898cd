//! Framework route scope.
//!
//! The HTTP layer decides which requests the locale middleware runs on at
//! all, before the normalizer applies its own bypass rules. Both checks exist
//! on purpose: this one is segment-aware and looks only at the final segment
//! for a file name, the normalizer is prefix- and substring-based.
//!
//! The scope is never wider than the normalizer's bypass: only single-segment
//! prefixes are excluded, and only when the raw path starts with them.

use crate::routing::matcher::PathMatcher;

/// Paths the locale middleware does not run on.
#[derive(Debug, Clone, Default)]
pub struct FrameworkScope {
    excluded_segments: Vec<String>,
}

impl FrameworkScope {
    /// Exclude every bypass prefix that names exactly one segment (`/api`).
    ///
    /// Deeper prefixes (`/jobs/feed`) are left to the normalizer; excluding
    /// their first segment would exempt siblings such as `/jobs`.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded_segments: Vec<String> = prefixes
            .into_iter()
            .filter_map(|p| {
                let segment = p.as_ref().strip_prefix('/')?;
                if segment.is_empty() || segment.contains('/') {
                    return None;
                }
                Some(segment.to_string())
            })
            .collect();
        excluded_segments.sort();
        excluded_segments.dedup();
        Self { excluded_segments }
    }

    pub fn excluded_segments(&self) -> &[String] {
        &self.excluded_segments
    }
}

impl PathMatcher for FrameworkScope {
    fn matches(&self, path: &str) -> bool {
        // First raw segment: `//api/x` has an empty one and is not excluded.
        let first = path
            .strip_prefix('/')
            .and_then(|rest| rest.split('/').next());
        if first.is_some_and(|s| self.excluded_segments.iter().any(|e| e == s)) {
            return true;
        }

        // name.ext in the final segment
        path.rsplit('/')
            .find(|s| !s.is_empty())
            .is_some_and(|s| s.contains('.'))
    }
}

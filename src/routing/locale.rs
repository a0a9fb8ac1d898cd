//! Locale/audience prefix normalization.
//!
//! Every page path is expected to start with `/{locale}/{audience}`. Paths
//! that don't are given the missing parts, falling back to the defaults, and
//! the caller redirects to the result.
//!
//! ```text
//! /blog              → /en/affiliate/blog
//! /ru/news           → /ru/affiliate/news
//! /fr/xyz/page       → /en/affiliate/fr/xyz/page
//! /en/affiliate/blog → pass
//! /favicon.ico       → pass (bypass)
//! ```

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::validation::ValidationError;
use crate::routing::matcher::PathMatcher;

/// Recognised locales and audiences plus the defaults used to fill gaps.
///
/// Built once at startup; the defaults are always members of their sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleAudienceConfig {
    locales: BTreeSet<String>,
    audiences: BTreeSet<String>,
    default_locale: String,
    default_audience: String,
}

impl LocaleAudienceConfig {
    /// Build a config, rejecting defaults that are not in their sets.
    pub fn new<L, A, S>(
        locales: L,
        audiences: A,
        default_locale: impl Into<String>,
        default_audience: impl Into<String>,
    ) -> Result<Self, ValidationError>
    where
        L: IntoIterator<Item = S>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: BTreeSet<String> = locales.into_iter().map(Into::into).collect();
        let audiences: BTreeSet<String> = audiences.into_iter().map(Into::into).collect();
        let default_locale = default_locale.into();
        let default_audience = default_audience.into();

        if !locales.contains(&default_locale) {
            return Err(ValidationError::UnknownDefaultLocale(default_locale));
        }
        if !audiences.contains(&default_audience) {
            return Err(ValidationError::UnknownDefaultAudience(default_audience));
        }

        Ok(Self {
            locales,
            audiences,
            default_locale,
            default_audience,
        })
    }

    pub fn is_locale(&self, segment: &str) -> bool {
        self.locales.contains(segment)
    }

    pub fn is_audience(&self, segment: &str) -> bool {
        self.audiences.contains(segment)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    pub fn audiences(&self) -> impl Iterator<Item = &str> {
        self.audiences.iter().map(String::as_str)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn default_audience(&self) -> &str {
        &self.default_audience
    }
}

impl Default for LocaleAudienceConfig {
    fn default() -> Self {
        Self {
            locales: ["en", "ru"].into_iter().map(String::from).collect(),
            audiences: ["affiliate", "webmaster"].into_iter().map(String::from).collect(),
            default_locale: "en".to_string(),
            default_audience: "affiliate".to_string(),
        }
    }
}

/// Outcome of normalizing one request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum NormalizationDecision {
    /// Continue normal dispatch with the path untouched.
    Pass,
    /// Redirect the client to `new_path`.
    Redirect { new_path: String },
}

impl NormalizationDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, NormalizationDecision::Pass)
    }

    /// The redirect target, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            NormalizationDecision::Pass => None,
            NormalizationDecision::Redirect { new_path } => Some(new_path),
        }
    }
}

/// The `{locale}/{audience}` prefix a path resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleContext {
    pub locale: String,
    pub audience: String,
}

/// Decide whether `path` may proceed or must be redirected.
///
/// Bypass rules are checked first and win unconditionally. After that the
/// first two non-empty segments are inspected:
/// - locale and audience both recognised: pass;
/// - locale recognised, audience not: the default audience is inserted after
///   the locale and everything after the locale is kept as-is;
/// - locale not recognised: the default locale plus an audience are prepended
///   and *all* original segments are kept, including a first segment that
///   happens to name an audience.
///
/// Total over every path; `/` resolves to `/{default_locale}/{default_audience}`.
pub fn normalize(
    path: &str,
    config: &LocaleAudienceConfig,
    bypass: &dyn PathMatcher,
) -> NormalizationDecision {
    if bypass.matches(path) {
        return NormalizationDecision::Pass;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let seg0 = segments.first().copied().filter(|s| config.is_locale(s));
    let seg1 = segments.get(1).copied().filter(|s| config.is_audience(s));

    let (locale, remaining) = match (seg0, seg1) {
        (Some(_), Some(_)) => return NormalizationDecision::Pass,
        (Some(locale), None) => (locale, &segments[1..]),
        (None, _) => (config.default_locale(), &segments[..]),
    };
    let audience = seg1.unwrap_or(config.default_audience());

    let mut new_path = String::with_capacity(path.len() + locale.len() + audience.len() + 3);
    new_path.push('/');
    new_path.push_str(locale);
    new_path.push('/');
    new_path.push_str(audience);
    for segment in remaining {
        new_path.push('/');
        new_path.push_str(segment);
    }

    NormalizationDecision::Redirect { new_path }
}

/// Resolve the prefix of an already-normalized path.
pub fn resolve_context(path: &str, config: &LocaleAudienceConfig) -> Option<LocaleContext> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let locale = segments.next().filter(|s| config.is_locale(s))?;
    let audience = segments.next().filter(|s| config.is_audience(s))?;
    Some(LocaleContext {
        locale: locale.to_string(),
        audience: audience.to_string(),
    })
}

//! Compiled path normalizer.
//!
//! # Responsibilities
//! - Hold the locale/audience sets and the compiled bypass rules
//! - Answer `normalize` and `context` for request paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Shared via Arc across all request tasks

use crate::config::schema::{BypassConfig, LocalesConfig};
use crate::config::validation::ValidationError;
use crate::routing::locale::{
    normalize, resolve_context, LocaleAudienceConfig, LocaleContext, NormalizationDecision,
};
use crate::routing::matcher::AnyMatcher;

/// Locale/audience prefix enforcement for request paths.
#[derive(Debug)]
pub struct PathNormalizer {
    locales: LocaleAudienceConfig,
    bypass: AnyMatcher,
}

impl PathNormalizer {
    pub fn new(locales: LocaleAudienceConfig, bypass: AnyMatcher) -> Self {
        Self { locales, bypass }
    }

    /// Compile a normalizer from the loaded configuration sections.
    pub fn from_config(
        locales: &LocalesConfig,
        bypass: &BypassConfig,
    ) -> Result<Self, ValidationError> {
        let locales = LocaleAudienceConfig::new(
            locales.locales.iter().map(String::as_str),
            locales.audiences.iter().map(String::as_str),
            locales.default_locale.as_str(),
            locales.default_audience.as_str(),
        )?;
        let bypass = AnyMatcher::bypass(bypass.prefixes.iter().cloned());

        tracing::debug!(
            bypass_rules = bypass.len(),
            default_locale = locales.default_locale(),
            default_audience = locales.default_audience(),
            "Path normalizer compiled"
        );

        Ok(Self::new(locales, bypass))
    }

    pub fn normalize(&self, path: &str) -> NormalizationDecision {
        normalize(path, &self.locales, &self.bypass)
    }

    /// The `{locale}/{audience}` prefix of `path`, when it has a valid one.
    pub fn context(&self, path: &str) -> Option<LocaleContext> {
        resolve_context(path, &self.locales)
    }

    pub fn locales(&self) -> &LocaleAudienceConfig {
        &self.locales
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new(
            LocaleAudienceConfig::default(),
            AnyMatcher::bypass(BypassConfig::default().prefixes),
        )
    }
}

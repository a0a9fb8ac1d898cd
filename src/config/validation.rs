//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check defaults are members of their locale/audience sets
//! - Validate value ranges (timeouts > 0, redirect status, addresses)
//! - Detect bypass prefixes that would swallow canonical page paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Redirect statuses accepted for normalization redirects.
///
/// Permanent redirects (301, 308) are cached by browsers and would pin
/// visitors to the current defaults.
pub const ALLOWED_REDIRECT_STATUSES: [u16; 3] = [302, 303, 307];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptySet { field: &'static str },

    #[error("{field} entry {value:?} is not a single path segment")]
    InvalidSegment { field: &'static str, value: String },

    #[error("{field} lists {value:?} more than once")]
    Duplicate { field: &'static str, value: String },

    #[error("default_locale {0:?} is not a recognised locale")]
    UnknownDefaultLocale(String),

    #[error("default_audience {0:?} is not a recognised audience")]
    UnknownDefaultAudience(String),

    #[error("bypass prefix {0:?} must start with '/' and name a path")]
    InvalidBypassPrefix(String),

    #[error("bypass prefix {prefix:?} overlaps locale {locale:?}")]
    BypassShadowsLocale { prefix: String, locale: String },

    #[error("redirect status {0} is not one of 302, 303, 307")]
    RedirectStatus(u16),

    #[error("{field} {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let locales = &config.locales;
    check_segments("locales.locales", &locales.locales, &mut errors);
    check_segments("locales.audiences", &locales.audiences, &mut errors);

    if !locales.locales.contains(&locales.default_locale) {
        errors.push(ValidationError::UnknownDefaultLocale(
            locales.default_locale.clone(),
        ));
    }
    if !locales.audiences.contains(&locales.default_audience) {
        errors.push(ValidationError::UnknownDefaultAudience(
            locales.default_audience.clone(),
        ));
    }

    for prefix in &config.bypass.prefixes {
        if !prefix.starts_with('/') || prefix.len() < 2 {
            errors.push(ValidationError::InvalidBypassPrefix(prefix.clone()));
            continue;
        }
        if let Some(locale) = locales
            .locales
            .iter()
            .find(|locale| shadows_locale(prefix, locale))
        {
            errors.push(ValidationError::BypassShadowsLocale {
                prefix: prefix.clone(),
                locale: locale.clone(),
            });
        }
    }

    if !ALLOWED_REDIRECT_STATUSES.contains(&config.redirect.status) {
        errors.push(ValidationError::RedirectStatus(config.redirect.status));
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    check_address("upstream.address", &config.upstream.address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_segments(field: &'static str, values: &[String], errors: &mut Vec<ValidationError>) {
    if values.is_empty() {
        errors.push(ValidationError::EmptySet { field });
        return;
    }

    let mut seen = HashSet::new();
    for value in values {
        // A dot would route the canonical path through the file bypass.
        if value.is_empty() || value.contains('/') || value.contains('.') {
            errors.push(ValidationError::InvalidSegment {
                field,
                value: value.clone(),
            });
        }
        if !seen.insert(value.as_str()) {
            errors.push(ValidationError::Duplicate {
                field,
                value: value.clone(),
            });
        }
    }
}

/// True when `prefix` would bypass some path under `/{locale}`.
fn shadows_locale(prefix: &str, locale: &str) -> bool {
    let canonical = format!("/{locale}/");
    canonical.starts_with(prefix) || prefix.starts_with(&canonical)
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_default_locale_must_be_recognised() {
        let mut config = GatewayConfig::default();
        config.locales.default_locale = "de".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnknownDefaultLocale("de".into())]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.locales.audiences.clear();
        config.redirect.status = 301;
        config.timeouts.request_secs = 0;
        config.upstream.address = "renderer".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors.contains(&ValidationError::EmptySet {
            field: "locales.audiences"
        }));
        assert!(errors.contains(&ValidationError::UnknownDefaultAudience("affiliate".into())));
        assert!(errors.contains(&ValidationError::RedirectStatus(301)));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::InvalidAddress {
            field: "upstream.address",
            value: "renderer".into(),
        }));
    }

    #[test]
    fn test_permanent_redirects_rejected() {
        for status in [301, 308, 200, 404] {
            let mut config = GatewayConfig::default();
            config.redirect.status = status;
            assert!(validate_config(&config).is_err(), "{status} accepted");
        }
        for status in ALLOWED_REDIRECT_STATUSES {
            let mut config = GatewayConfig::default();
            config.redirect.status = status;
            assert!(validate_config(&config).is_ok(), "{status} rejected");
        }
    }

    #[test]
    fn test_bad_segments() {
        let mut config = GatewayConfig::default();
        config.locales.locales = vec!["en".into(), "en".into(), "pt/br".into(), "".into()];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::Duplicate {
            field: "locales.locales",
            value: "en".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidSegment {
            field: "locales.locales",
            value: "pt/br".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidSegment {
            field: "locales.locales",
            value: "".into(),
        }));
    }

    #[test]
    fn test_bypass_prefixes() {
        let mut config = GatewayConfig::default();
        config.bypass.prefixes = vec![
            "/".into(),
            "api".into(),
            "/e".into(),
            "/ru/webmaster/private".into(),
            "/rules".into(),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBypassPrefix("/".into()),
                ValidationError::InvalidBypassPrefix("api".into()),
                ValidationError::BypassShadowsLocale {
                    prefix: "/e".into(),
                    locale: "en".into(),
                },
                ValidationError::BypassShadowsLocale {
                    prefix: "/ru/webmaster/private".into(),
                    locale: "ru".into(),
                },
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}

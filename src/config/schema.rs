//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locale gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Recognised locales, audiences and their defaults.
    pub locales: LocalesConfig,

    /// Paths exempt from locale/audience rewriting.
    pub bypass: BypassConfig,

    /// Redirect response settings.
    pub redirect: RedirectConfig,

    /// Page renderer that receives normalized requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Locale and audience sets.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LocalesConfig {
    /// Two-letter language codes selecting UI text.
    pub locales: Vec<String>,

    /// Visitor segments selecting the content set.
    pub audiences: Vec<String>,

    /// Locale used when the path carries none. Must be listed in `locales`.
    pub default_locale: String,

    /// Audience used when the path carries none. Must be listed in `audiences`.
    pub default_audience: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "ru".to_string()],
            audiences: vec!["affiliate".to_string(), "webmaster".to_string()],
            default_locale: "en".to_string(),
            default_audience: "affiliate".to_string(),
        }
    }
}

/// Bypass rules.
///
/// Paths containing a `.` are always bypassed in addition to these prefixes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BypassConfig {
    /// Path prefixes matched with plain, case-sensitive `starts_with`.
    pub prefixes: Vec<String>,
}

impl Default for BypassConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                // framework internals
                "/_next".to_string(),
                "/api".to_string(),
                // admin studio
                "/studio".to_string(),
                "/static".to_string(),
            ],
        }
    }
}

/// Redirect response configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RedirectConfig {
    /// HTTP status used for normalization redirects (302, 303 or 307).
    pub status: u16,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { status: 307 }
    }
}

/// Upstream renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Renderer address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for local runs.
    #[default]
    Text,
    /// One JSON object per event for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

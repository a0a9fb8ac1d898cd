//! Locale/audience path normalizing gateway.
//!
//! Sits in front of the site renderer and makes sure every page request
//! carries a recognised `/{locale}/{audience}` prefix, redirecting when it
//! does not.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{normalize, LocaleAudienceConfig, NormalizationDecision, PathNormalizer};

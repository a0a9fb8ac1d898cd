//! Request middleware.

pub mod locale_redirect;
pub mod scope;

use axum::http::HeaderName;

pub use locale_redirect::{locale_redirect_middleware, RedirectState};
pub use scope::FrameworkScope;

/// Locale forwarded to the upstream renderer.
pub const X_SITE_LOCALE: HeaderName = HeaderName::from_static("x-site-locale");

/// Audience forwarded to the upstream renderer.
pub const X_SITE_AUDIENCE: HeaderName = HeaderName::from_static("x-site-audience");

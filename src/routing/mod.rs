//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → matcher.rs (bypass rules: prefixes, file extensions)
//!     → locale.rs (inspect first two segments)
//!     → Return: Pass or Redirect { new_path }
//!
//! Normalizer Compilation (at startup):
//!     LocalesConfig + BypassConfig
//!     → Validate defaults against recognised sets
//!     → Compile bypass matchers
//!     → Freeze as immutable PathNormalizer
//! ```
//!
//! # Design Decisions
//! - Normalizer built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always yields the same decision
//! - Bypass rules evaluated before any segment inspection

pub mod locale;
pub mod matcher;
pub mod normalizer;

pub use locale::{normalize, LocaleAudienceConfig, LocaleContext, NormalizationDecision};
pub use normalizer::PathNormalizer;

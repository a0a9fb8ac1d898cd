//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from RUST_LOG or config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, text format for development
//! - RUST_LOG overrides the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ConfigError, LogFormat, ObservabilityConfig};

/// Filter used when RUST_LOG is unset.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!(
        "locale_gateway={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into());

    match config.log_format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }
}

/// Log a fatal configuration error, one event per violation.
pub fn report_config_error(error: &ConfigError) {
    match error {
        ConfigError::Validation(errors) => {
            for violation in errors {
                tracing::error!(violation = %violation, "Invalid configuration");
            }
            tracing::error!(count = errors.len(), "Configuration rejected");
        }
        other => tracing::error!(error = %other, "Failed to load configuration"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(error: &ConfigError) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || report_config_error(error));

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_config_violations_logged_as_errors() {
        let error = ConfigError::Validation(vec![
            ValidationError::RedirectStatus(301),
            ValidationError::UnknownDefaultLocale("fr".into()),
        ]);

        let output = capture(&error);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3, "{output}");
        assert!(lines.iter().all(|line| line.contains("ERROR")), "{output}");
        assert!(output.contains(&ValidationError::RedirectStatus(301).to_string()));
        assert!(output.contains("fr"));
        assert!(output.contains("count=2"));
    }

    #[test]
    fn test_load_failure_logged_as_error() {
        let error = ConfigError::Io(io::Error::new(io::ErrorKind::NotFound, "gateway.toml"));

        let output = capture(&error);
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("Failed to load configuration"));
        assert!(output.contains("gateway.toml"));
    }

    #[test]
    fn test_default_filter_uses_level() {
        let config = ObservabilityConfig {
            log_level: "debug".into(),
            ..ObservabilityConfig::default()
        };
        assert_eq!(
            default_filter(&config),
            "locale_gateway=debug,tower_http=debug"
        );
        assert!(EnvFilter::try_new(default_filter(&config)).is_ok());
    }
}

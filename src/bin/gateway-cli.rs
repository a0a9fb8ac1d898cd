use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use locale_gateway::config::loader::{load_config, load_or_default};
use locale_gateway::config::ConfigError;
use locale_gateway::{NormalizationDecision, PathNormalizer};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Offline tooling for the locale gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how request paths would be normalized
    Check {
        /// Configuration file (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Request paths, e.g. /blog or /ru/news
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Validate a configuration file
    Validate {
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct CheckLine<'a> {
    path: &'a str,
    #[serde(flatten)]
    decision: NormalizationDecision,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { config, paths } => check(config, &paths),
        Commands::Validate { file } => validate(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn check(config: Option<PathBuf>, paths: &[String]) -> Result<(), ConfigError> {
    let config = load_or_default(config.as_deref())?;
    let normalizer = PathNormalizer::from_config(&config.locales, &config.bypass)
        .map_err(|e| ConfigError::Validation(vec![e]))?;

    for path in paths {
        match check_line(path, normalizer.normalize(path)) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: cannot encode result for {path}: {e}"),
        }
    }
    Ok(())
}

/// One JSON object per checked path: `{"path":..,"decision":..}`.
fn check_line(path: &str, decision: NormalizationDecision) -> serde_json::Result<String> {
    serde_json::to_string(&CheckLine { path, decision })
}

fn validate(file: PathBuf) -> Result<(), ConfigError> {
    load_config(&file)?;
    println!("{}: OK", file.display());
    Ok(())
}

fn print_error(error: &ConfigError) {
    match error {
        ConfigError::Validation(errors) => {
            eprintln!("Error: configuration is invalid");
            for error in errors {
                eprintln!("  - {error}");
            }
        }
        other => eprintln!("Error: {other}"),
    }
}

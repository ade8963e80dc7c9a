mod cli;
mod runner;

use std::io::Write;
use std::process::ExitCode;

use screencheck_common::{ConfigError, ScreenCheckError};
use screencheck_config::ScreenCheckConfig;
use tracing_subscriber::EnvFilter;

fn load_config(args: &cli::Args) -> Result<ScreenCheckConfig, ConfigError> {
    match &args.config {
        Some(path) => screencheck_config::load_config_from(path),
        None => screencheck_config::load_config(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config first: it may carry the log level.
    let loaded = load_config(&args);

    let log_directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.directive(),
        (None, Err(_)) => "screencheck=info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            log_directive.parse().unwrap_or_else(|_| {
                tracing_subscriber::filter::LevelFilter::INFO.into()
            }),
        ))
        .init();

    tracing::info!("screencheck v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ScreenCheckConfig::default()
    });
    tracing::debug!("config: {}", screencheck_config::config_to_json(&config));

    let report = runner::run(&args, &config).await;

    match print_report(&report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("failed to write report: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &runner::Report) -> screencheck_common::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ScreenCheckError::Other(format!("failed to serialize report: {e}")))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    Ok(())
}

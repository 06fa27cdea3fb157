use anyhow::Result;
use clap::Parser;
use classmate::cli::{handle_command, Cli};
use classmate::config::{ClientConfig, LogFormat};
use std::process::ExitCode;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ClientConfig::load(cli.config.as_deref(), cli.base_url.clone())?;
    init_logging(config.log_format, cli.verbose);

    tracing::debug!("Backend: {:?}", config.backend_api);

    let succeeded = handle_command(cli.command, config).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// Logs go to stderr, results to stdout
fn init_logging(format: LogFormat, verbose: bool) {
    let directive = if verbose {
        "classmate=debug"
    } else {
        "classmate=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init(),
    }
}

//! Lineage CLI
//!
//! Renders Lineage pages from the command line.

#![forbid(unsafe_code)]

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use lineage_cli::cli::{Cli, Command, default_log_filter};
use lineage_cli::commands::{SourceSpec, show};
use lineage_cli::config::LineageConfig;
use lineage_cli::config_handlers::handle_config_command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(cli.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Config { action } => {
            handle_config_command(cli.config.as_deref(), action)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show {
            path,
            format,
            color,
        } => {
            let mut config = LineageConfig::load(cli.config.as_deref())?;
            if let Some(endpoint) = cli.endpoint {
                config.client.endpoint = endpoint;
            }

            let source = match cli.file {
                Some(file) => SourceSpec::File(file),
                None => SourceSpec::Http(config.client),
            };
            let path = path.unwrap_or(config.display.default_path);
            let color = color.unwrap_or(config.display.color).enabled(
                std::io::stdout().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );

            let outcome = show(&source, &path, format, color, interrupted()).await?;
            print!("{}", outcome.output);
            Ok(ExitCode::from(outcome.status.exit_code()))
        }
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::OutputFormat;
use crate::config::ColorMode;

/// Lineage - browse people and their parents from a JSON endpoint
#[derive(Parser, Debug)]
#[command(name = "lineage", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// People endpoint URL, overriding the config file and the environment
    #[arg(long, conflicts_with = "file")]
    pub endpoint: Option<String>,

    /// Read people from a local JSON file instead of the endpoint.
    /// Top-level only: `config init` has its own `--file`.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the page for a path
    Show {
        /// Path to render, e.g. `/`, `/people` or `/people/{slug}`
        path: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Color text output
        #[arg(long, value_enum)]
        color: Option<ColorMode>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `client.endpoint`
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Log filter for a `-v` count. `RUST_LOG` takes precedence over this.
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,lineage=info",
        1 => "info,lineage=debug",
        _ => "debug,lineage=trace",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_defaults() {
        let cli = Cli::try_parse_from(["lineage", "show"]).unwrap();
        let Command::Show {
            path,
            format,
            color,
        } = cli.command
        else {
            unreachable!("Expected show");
        };
        assert_eq!(path, None);
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(color, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_show_with_source_and_verbosity() {
        let cli = Cli::try_parse_from([
            "lineage",
            "--file",
            "people.json",
            "show",
            "/people/eve",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("people.json")));
        assert_eq!(cli.verbose, 2);
        let Command::Show { path, format, .. } = cli.command else {
            unreachable!("Expected show");
        };
        assert_eq!(path.as_deref(), Some("/people/eve"));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_endpoint_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "lineage",
            "--endpoint",
            "http://x/p.json",
            "--file",
            "p.json",
            "show",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init_flags() {
        let cli =
            Cli::try_parse_from(["lineage", "config", "init", "--file", "c.toml", "--force"])
                .unwrap();
        let Command::Config {
            action: ConfigAction::Init { file, force },
        } = cli.command
        else {
            unreachable!("Expected config init");
        };
        assert_eq!(file.as_deref(), Some("c.toml"));
        assert!(force);
    }

    #[test]
    fn test_config_init_file_is_independent_of_source_file() {
        let cli = Cli::try_parse_from([
            "lineage",
            "--file",
            "people.json",
            "config",
            "init",
            "--file",
            "lineage.toml",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("people.json")));
        let Command::Config {
            action: ConfigAction::Init { file, force },
        } = cli.command
        else {
            unreachable!("Expected config init");
        };
        assert_eq!(file.as_deref(), Some("lineage.toml"));
        assert!(!force);
    }

    #[test]
    fn test_config_init_file_parses_and_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("nested").join("config.toml");
        let cli = Cli::try_parse_from([
            "lineage",
            "config",
            "init",
            "--file",
            target.to_str().unwrap(),
        ])
        .unwrap();
        let Command::Config { action } = cli.command else {
            unreachable!("Expected config");
        };

        crate::config_handlers::handle_config_command(None, action).unwrap();
        assert!(target.exists());
    }

    #[test]
    fn test_source_file_is_not_accepted_after_subcommand() {
        let result = Cli::try_parse_from(["lineage", "show", "--file", "people.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_log_filter_levels() {
        assert_eq!(default_log_filter(0), "warn,lineage=info");
        assert!(default_log_filter(1).contains("lineage=debug"));
        assert!(default_log_filter(5).contains("lineage=trace"));
    }
}

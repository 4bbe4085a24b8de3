//! Configuration file for the `lineage` command.
//!
//! Resolution order for the file itself: `--config`, then `LINEAGE_CONFIG`,
//! then `<config dir>/lineage/config.toml`. Values are layered with
//! [`confyg`]: defaults, then the file, then `LINEAGE_<SECTION>_<KEY>`
//! variables such as `LINEAGE_CLIENT_ENDPOINT` or
//! `LINEAGE_DISPLAY_COLOR`. Command-line flags override all of them.

use std::path::PathBuf;

use clap::ValueEnum;
use confyg::{Confygery, env};
use lineage_client::ClientConfig;
use lineage_view::route::PEOPLE_PATH;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name used for the config directory and in user-facing hints.
pub const PROJECT_NAME: &str = "lineage";

/// Env var naming an alternative config file.
pub const CONFIG_ENV: &str = "LINEAGE_CONFIG";

/// Prefix of the env vars overlaid on the config file.
pub const ENV_PREFIX: &str = PROJECT_NAME;

/// Config sections that may be set from the environment.
pub const ENV_SECTIONS: [&str; 2] = ["client", "display"];

/// When to color text output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorMode {
    /// Decides whether to color, given whether stdout is a terminal and
    /// whether `NO_COLOR` is set.
    pub fn enabled(self, is_terminal: bool, no_color: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal && !no_color,
        }
    }
}

/// Display settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text output coloring.
    pub color: ColorMode,
    /// Path shown by `lineage show` without an argument.
    pub default_path: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            default_path: PEOPLE_PATH.to_string(),
        }
    }
}

/// Everything read from the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// People source settings.
    pub client: ClientConfig,
    /// Output settings.
    pub display: DisplayConfig,
}

impl LineageConfig {
    /// `<config dir>/lineage/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file path using the process environment.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, env_lookup)
    }

    /// Resolves the config file path with `lookup` standing in for the
    /// environment.
    pub fn resolve_config_path_with<F>(explicit: Option<&str>, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        explicit
            .map(PathBuf::from)
            .or_else(|| lookup(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Loads the config, overlaying `LINEAGE_*` variables on the file.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_layered(explicit, env_lookup, true)
    }

    /// Loads the config file alone, with `lookup` standing in for the
    /// environment when resolving the path.
    ///
    /// A missing file yields defaults, unless the path was given explicitly.
    pub fn load_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_layered(explicit, lookup, false)
    }

    fn load_layered<F>(explicit: Option<&str>, lookup: F, with_env: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match Self::resolve_config_path_with(explicit, &lookup) {
            Some(path) if path.exists() => Some(path),
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => None,
        };

        let mut builder = Confygery::new()
            .map_err(|e| Error::config(format!("Failed to load configuration: {e}")))?;
        if let Some(path) = &file {
            // Checked here so a bad file is reported with its path.
            let content =
                std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
            Self::from_toml_str(&content)
                .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
            let name = path.to_str().ok_or_else(|| {
                Error::config(format!("Config path is not valid UTF-8: {}", path.display()))
            })?;
            builder.add_file(name);
            tracing::debug!(path = %path.display(), "Loaded config file");
        }
        if with_env {
            builder.add_env(env_options());
        }

        builder
            .build()
            .map_err(|e| Error::config(format!("Failed to load configuration: {e}")))
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

fn env_options() -> env::Options {
    let mut opts = env::Options::with_top_level(ENV_PREFIX);
    for section in ENV_SECTIONS {
        opts.add_section(section);
    }
    opts
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = LineageConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[client]"));
        assert!(text.contains("[display]"));
        assert_eq!(LineageConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = LineageConfig::from_toml_str("[client]\ntimeout_secs = 3\n").unwrap();
        assert_eq!(config.client.timeout_secs, 3);
        assert_eq!(config.client.endpoint, lineage_client::config::DEFAULT_ENDPOINT);
        assert_eq!(config.display.default_path, "/people");
        assert_eq!(config.display.color, ColorMode::Auto);
    }

    #[test]
    fn test_color_mode_parses_lowercase() {
        let config = LineageConfig::from_toml_str("[display]\ncolor = \"never\"\n").unwrap();
        assert_eq!(config.display.color, ColorMode::Never);
    }

    #[test]
    fn test_resolve_prefers_explicit_then_env() {
        let env = env_of(&[(CONFIG_ENV, "/from/env.toml")]);
        assert_eq!(
            LineageConfig::resolve_config_path_with(Some("/explicit.toml"), &env),
            Some(PathBuf::from("/explicit.toml"))
        );
        assert_eq!(
            LineageConfig::resolve_config_path_with(None, &env),
            Some(PathBuf::from("/from/env.toml"))
        );
        assert_eq!(
            LineageConfig::resolve_config_path_with(None, no_env),
            LineageConfig::default_config_path()
        );
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\nendpoint = \"http://localhost:9/p.json\"\n").unwrap();

        let config = LineageConfig::load_with(Some(path.to_str().unwrap()), no_env).unwrap();
        assert_eq!(config.client.endpoint, "http://localhost:9/p.json");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = LineageConfig::load_with(Some(path.to_str().unwrap()), no_env).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_missing_env_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let env = env_of(&[(CONFIG_ENV, path.to_str().unwrap())]);

        let config = LineageConfig::load_with(None, env).unwrap();
        assert_eq!(config, LineageConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client\n").unwrap();

        let err = LineageConfig::load_with(Some(path.to_str().unwrap()), no_env).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_of_outlives_its_pairs() {
        let env = {
            let key = String::from(CONFIG_ENV);
            env_of(&[(key.as_str(), "/tmp/lineage.toml")])
        };
        assert_eq!(env(CONFIG_ENV).as_deref(), Some("/tmp/lineage.toml"));
        assert_eq!(env("OTHER"), None);
    }

    #[test]
    fn test_load_file_with_string_timeout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ntimeout_secs = \"4\"\n").unwrap();

        let config = LineageConfig::load_with(Some(path.to_str().unwrap()), no_env).unwrap();
        assert_eq!(config.client.timeout_secs, 4);
    }

    #[test]
    fn test_color_mode_enabled() {
        assert!(ColorMode::Always.enabled(false, true));
        assert!(!ColorMode::Never.enabled(true, false));
        assert!(ColorMode::Auto.enabled(true, false));
        assert!(!ColorMode::Auto.enabled(true, true));
        assert!(!ColorMode::Auto.enabled(false, false));
    }
}

//! Handler functions for config CLI commands.
//!
//! Implements the `path`, `get`, `set` and `init` subcommands over
//! [`LineageConfig`], plus the TOML dotted-key helpers they share.

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{LineageConfig, PROJECT_NAME};
use crate::error::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = LineageConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = LineageConfig::load(config_path)?;
    println!("{}", lookup_key(&config, key)?);
    Ok(())
}

/// Formatted value of a dotted key in `config`.
pub fn lookup_key(config: &LineageConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a configuration value by dotted key in the config file.
///
/// The key must already exist in the configuration schema, and the
/// updated file must still load.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = LineageConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{PROJECT_NAME} config init` first.",
            path.display()
        )));
    }

    let defaults = toml::Value::try_from(LineageConfig::default())
        .map_err(|e| Error::config(e.to_string()))?;
    if get_nested_value(&defaults, key).is_none() {
        return Err(Error::config(format!("Unknown configuration key '{key}'")));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    LineageConfig::from_toml_str(&toml_str)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => LineageConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = LineageConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = match parts.pop() {
        Some(last) if !last.is_empty() => last,
        _ => return Err(Error::config("Empty key path")),
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool, then integer, then string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, LineageConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // path / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_path_explicit() {
        assert!(cmd_config_path(Some("/explicit/config.toml")).is_ok());
    }

    #[test]
    fn test_lookup_key_values() {
        let config = LineageConfig::default();
        assert_eq!(
            lookup_key(&config, "client.endpoint").unwrap(),
            lineage_client::config::DEFAULT_ENDPOINT
        );
        assert_eq!(lookup_key(&config, "client.timeout_secs").unwrap(), "10");
        assert_eq!(lookup_key(&config, "display.color").unwrap(), "auto");
        assert!(lookup_key(&config, "client").unwrap().contains("endpoint"));
    }

    #[test]
    fn test_cmd_config_get_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        assert!(cmd_config_get(Some(path.to_str().unwrap()), "display.default_path").is_ok());
    }

    #[test]
    fn test_cmd_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let err = cmd_config_get(Some(path.to_str().unwrap()), "nonexistent.key").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_set_updates_file() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let path_str = path.to_str().unwrap();

        cmd_config_set(Some(path_str), "client.timeout_secs", "30").unwrap();
        cmd_config_set(Some(path_str), "display.color", "never").unwrap();

        let config = LineageConfig::from_toml_str(&std::fs::read_to_string(&path).unwrap())
            .unwrap();
        assert_eq!(config.client.timeout_secs, 30);
        assert_eq!(config.display.color, crate::config::ColorMode::Never);
    }

    #[test]
    fn test_cmd_config_set_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        let err = cmd_config_set(Some(path.to_str().unwrap()), "client.retries", "3").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_cmd_config_set_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err =
            cmd_config_set(Some(path.to_str().unwrap()), "client.timeout_secs", "soon").unwrap_err();
        assert!(err.to_string().contains("Invalid value"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_cmd_config_set_missing_file() {
        let err = cmd_config_set(Some("/nonexistent/config.toml"), "client.endpoint", "x")
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // init
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineage").join("config.toml");

        cmd_config_init(Some(path.to_str().unwrap()), false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[client]"));
        assert!(content.contains("[display]"));
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let err = cmd_config_init(Some(path.to_str().unwrap()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_config_init(Some(path.to_str().unwrap()), true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("endpoint"));
    }

    // ------------------------------------------------------------------------
    // TOML helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::from_str("[client]\ntimeout_secs = 3").unwrap();
        assert_eq!(
            get_nested_value(&val, "client.timeout_secs"),
            Some(&toml::Value::Integer(3))
        );
        assert!(get_nested_value(&val, "client.nonexistent").is_none());
        assert!(get_nested_value(&val, "client.timeout_secs.deeper").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_section() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "display.color", toml::Value::String("always".into())).unwrap();
        assert_eq!(
            get_nested_value(&val, "display.color"),
            Some(&toml::Value::String("always".into()))
        );
    }

    #[test]
    fn test_set_nested_value_rejects_empty_key() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        assert!(set_nested_value(&mut val, "", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut val: toml::Value = toml::from_str("client = 1").unwrap();
        let err = set_nested_value(&mut val, "client.endpoint", toml::Value::Integer(2));
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("false"), toml::Value::Boolean(false));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(
            parse_value("http://localhost/p.json"),
            toml::Value::String("http://localhost/p.json".to_string())
        );
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("hi".into())), "hi");
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    }
}

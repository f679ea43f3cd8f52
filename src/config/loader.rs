//! Configuration loading and discovery for `zxpaint.toml`

use super::schema::ZxConfig;
use crate::export::NumberFormat;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked for during discovery.
pub const CONFIG_FILE_NAME: &str = "zxpaint.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse zxpaint.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub bytes_per_line: Option<usize>,
    /// Force decimal `DEFB` values
    pub decimal: Option<bool>,
    pub scale: Option<u32>,
    pub grid: Option<bool>,
}

/// Locate the config file for this process.
///
/// The nearest `zxpaint.toml` in the current directory or one of its
/// ancestors wins. Otherwise `zxpaint/zxpaint.toml` under the user config
/// directory (`$XDG_CONFIG_HOME`, falling back to `~/.config`) is used.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|cwd| find_config_from(&cwd))
        .or_else(user_config_file)
}

/// Nearest `zxpaint.toml` in `start` or its ancestors.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|p| p.is_file())
}

fn user_config_file() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("zxpaint").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Load configuration from an explicit path, or from the discovered file.
///
/// With no explicit path and no file found, the defaults are returned. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<ZxConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<ZxConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ZxConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

fn check(config: &ZxConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

pub fn default_config() -> ZxConfig {
    ZxConfig::default()
}

/// Merge CLI overrides into a configuration, then re-check it.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut ZxConfig, overrides: &CliOverrides) -> Result<(), ConfigError> {
    if let Some(bytes_per_line) = overrides.bytes_per_line {
        config.asm.bytes_per_line = bytes_per_line;
    }
    if let Some(decimal) = overrides.decimal {
        config.asm.number_format = if decimal { NumberFormat::Decimal } else { NumberFormat::Hex };
    }
    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }
    if let Some(grid) = overrides.grid {
        config.render.grid = grid;
    }
    check(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(body)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[asm]\nbytes_per_line = 4");

        let found = find_config_from(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("gfx").join("levels");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(&subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_skips_directory_with_config_name() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let project = temp.path().join("project");
        fs::create_dir_all(project.join(CONFIG_FILE_NAME)).expect("should create directory");

        assert_eq!(find_config_from(&project), Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path()), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[asm]
bytes_per_line = 16
hex_prefix = "0x"

[render]
grid = true
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.asm.bytes_per_line, 16);
        assert_eq!(config.asm.hex_prefix, "0x");
        assert_eq!(config.render.scale, 4);
        assert!(config.render.grid);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");
        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[asm]\nbytes_per_line = 64\n");
        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("asm.bytes_per_line"));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            bytes_per_line: Some(2),
            decimal: Some(true),
            scale: Some(8),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.asm.bytes_per_line, 2);
        assert_eq!(config.asm.number_format, NumberFormat::Decimal);
        assert_eq!(config.render.scale, 8);
        assert!(!config.render.grid);
    }

    #[test]
    fn test_merge_cli_overrides_rechecks() {
        let mut config = default_config();
        let overrides = CliOverrides { scale: Some(0), ..Default::default() };
        assert!(matches!(merge_cli_overrides(&mut config, &overrides), Err(ConfigError::Validation(_))));
    }
}

//! Configuration file support for arkitecto.
//!
//! Settings come from an optional `arkitecto.config.yml`, the environment
//! (including a `.env` file loaded at startup) and command-line flags.
//! Precedence: CLI flag > environment > config file > default.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::budgeting::policies::LoadRetryPolicy;
use crate::shared::error::ArkitectoError;
use crate::shared::security::{validate_input_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::AppResult;

pub const CONFIG_FILENAME: &str = "arkitecto.config.yml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_URL: &str = "ARKITECTO_API_URL";
pub const ENV_TOKEN: &str = "ARKITECTO_TOKEN";
pub const ENV_TOKEN_FILE: &str = "ARKITECTO_TOKEN_FILE";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub token_file: Option<PathBuf>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> AppResult<ConfigFile> {
    validate_input_file(path, "config file", MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).map_err(|e| ArkitectoError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let config: ConfigFile =
        serde_yaml_ng::from_str(&content).map_err(|e| ArkitectoError::InvalidConfig {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    validate_config(&config).map_err(|details| ArkitectoError::InvalidConfig {
        path: path.to_path_buf(),
        details,
    })?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> AppResult<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<(), String> {
    if let Some(url) = &config.api_base_url {
        validate_base_url(url)?;
    }
    if config.timeout_secs == Some(0) {
        return Err("timeout_secs must be greater than 0".to_string());
    }
    if config.retry_attempts == Some(0) {
        return Err("retry_attempts must be at least 1".to_string());
    }
    if config.token_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        return Err("token_file must not be empty".to_string());
    }
    Ok(())
}

fn validate_base_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("api_base_url must not be empty".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!(
            "api_base_url must start with http:// or https:// (got '{}')",
            url
        ));
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
    }
}

/// Where the session token comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Token given directly through the environment
    Inline(String),
    /// File re-read on every request
    File(PathBuf),
    None,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout: Duration,
    pub token: TokenSource,
    pub retry_policy: LoadRetryPolicy,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
}

impl Settings {
    /// Merges CLI flags, environment and config file over the defaults.
    ///
    /// `env` looks up a variable by name; blank values count as unset.
    pub fn resolve<F>(file: Option<&ConfigFile>, env: F, cli: &CliOverrides) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let api_base_url = cli
            .api_url
            .clone()
            .or_else(|| env(ENV_API_URL))
            .or_else(|| file.and_then(|f| f.api_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        validate_base_url(&api_base_url)
            .map_err(|message| ArkitectoError::validation("api url", message))?;
        let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();

        let timeout_secs = file
            .and_then(|f| f.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let token = if let Some(token) = env(ENV_TOKEN) {
            TokenSource::Inline(token.trim().to_string())
        } else if let Some(path) = env(ENV_TOKEN_FILE) {
            TokenSource::File(PathBuf::from(path))
        } else if let Some(path) = file.and_then(|f| f.token_file.clone()) {
            TokenSource::File(path)
        } else {
            TokenSource::None
        };

        let retry_policy = LoadRetryPolicy::new(
            file.and_then(|f| f.retry_attempts)
                .unwrap_or(LoadRetryPolicy::DEFAULT_MAX_ATTEMPTS),
            file.and_then(|f| f.retry_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(LoadRetryPolicy::DEFAULT_DELAY),
        );

        Ok(Self {
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
            token,
            retry_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
api_base_url: https://api.arkitecto.cl
timeout_secs: 90
token_file: /run/arkitecto/token
retry_attempts: 5
retry_delay_ms: 500
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("https://api.arkitecto.cl"));
        assert_eq!(config.timeout_secs, Some(90));
        assert_eq!(config.token_file, Some(PathBuf::from("/run/arkitecto/token")));
        assert_eq!(config.retry_attempts, Some(5));
        assert_eq!(config.retry_delay_ms, Some(500));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "timeout_secs: 10\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/arkitecto.config.yml")).unwrap_err();
        assert!(matches!(err, ArkitectoError::FileReadError { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "timeout_secs: [unclosed").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(matches!(err, ArkitectoError::InvalidConfig { .. }));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "timeout_secs: 5\ntheme: dark\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("theme"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        for (yaml, expected) in [
            ("timeout_secs: 0\n", "timeout_secs"),
            ("retry_attempts: 0\n", "retry_attempts"),
            ("api_base_url: \"\"\n", "api_base_url"),
            ("api_base_url: ftp://host\n", "http://"),
        ] {
            let config_path = dir.path().join("config.yml");
            fs::write(&config_path, yaml).unwrap();
            let err = load_config_from_path(&config_path).unwrap_err();
            assert!(err.to_string().contains(expected), "{yaml} -> {err}");
        }
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings = Settings::resolve(None, no_env, &CliOverrides::default()).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.token, TokenSource::None);
        assert_eq!(settings.retry_policy, LoadRetryPolicy::default());
    }

    #[test]
    fn test_precedence_cli_env_file() {
        let file = ConfigFile {
            api_base_url: Some("http://file:8000".to_string()),
            ..ConfigFile::default()
        };
        let env = |name: &str| (name == ENV_API_URL).then(|| "http://env:8000/".to_string());

        let from_env = Settings::resolve(Some(&file), env, &CliOverrides::default()).unwrap();
        assert_eq!(from_env.api_base_url, "http://env:8000");

        let cli = CliOverrides {
            api_url: Some("https://cli.example".to_string()),
        };
        let from_cli = Settings::resolve(Some(&file), env, &cli).unwrap();
        assert_eq!(from_cli.api_base_url, "https://cli.example");

        let from_file = Settings::resolve(Some(&file), no_env, &CliOverrides::default()).unwrap();
        assert_eq!(from_file.api_base_url, "http://file:8000");
    }

    #[test]
    fn test_token_sources() {
        let file = ConfigFile {
            token_file: Some(PathBuf::from("/from/file")),
            ..ConfigFile::default()
        };

        let inline = |name: &str| match name {
            ENV_TOKEN => Some("abc".to_string()),
            ENV_TOKEN_FILE => Some("/from/env".to_string()),
            _ => None,
        };
        let settings = Settings::resolve(Some(&file), inline, &CliOverrides::default()).unwrap();
        assert_eq!(settings.token, TokenSource::Inline("abc".to_string()));

        let env_file = |name: &str| (name == ENV_TOKEN_FILE).then(|| "/from/env".to_string());
        let settings = Settings::resolve(Some(&file), env_file, &CliOverrides::default()).unwrap();
        assert_eq!(settings.token, TokenSource::File(PathBuf::from("/from/env")));

        let settings = Settings::resolve(Some(&file), no_env, &CliOverrides::default()).unwrap();
        assert_eq!(settings.token, TokenSource::File(PathBuf::from("/from/file")));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let blank = |_: &str| Some("  ".to_string());
        let settings = Settings::resolve(None, blank, &CliOverrides::default()).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.token, TokenSource::None);
    }

    #[test]
    fn test_invalid_cli_url() {
        let cli = CliOverrides {
            api_url: Some("localhost:8000".to_string()),
        };
        let err = Settings::resolve(None, no_env, &cli).unwrap_err();
        assert!(matches!(err, ArkitectoError::Validation { .. }));
    }

    #[test]
    fn test_retry_settings_from_file() {
        let file = ConfigFile {
            retry_attempts: Some(5),
            retry_delay_ms: Some(250),
            ..ConfigFile::default()
        };
        let settings = Settings::resolve(Some(&file), no_env, &CliOverrides::default()).unwrap();
        assert_eq!(
            settings.retry_policy,
            LoadRetryPolicy::new(5, Duration::from_millis(250))
        );
    }
}

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! fba-tools Configuration
//!
//! This crate provides configuration management for the fba-tools client.
//! It handles loading, saving, and managing configuration files that specify:
//! - Service endpoint settings (URL, timeout, service version, TLS trust)
//! - Static credentials
//! - Async job polling settings
//! - Logging configuration
//!
//! Configuration is stored in TOML format. Every section is optional in the
//! file; missing values fall back to the defaults. Environment variables
//! (see [`Config::apply_env`]) override values read from the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
pub use transport::Credentials;

mod polling;

pub use polling::PollSchedule;

/// Default service endpoint.
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// Environment variable overriding [`ServiceConfig::url`].
pub const ENV_URL: &str = "FBA_TOOLS_URL";
/// Environment variable overriding the static token.
pub const ENV_TOKEN: &str = "FBA_TOOLS_TOKEN";
/// Environment variable overriding [`ServiceConfig::timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "FBA_TOOLS_TIMEOUT_MS";
/// Environment variable overriding [`ServiceConfig::service_version`].
pub const ENV_SERVICE_VERSION: &str = "FBA_TOOLS_SERVICE_VERSION";
/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "FBA_TOOLS_LOG_LEVEL";
/// Environment variable overriding [`ServiceConfig::allow_insecure_http`].
pub const ENV_ALLOW_INSECURE_HTTP: &str = "FBA_TOOLS_ALLOW_INSECURE_HTTP";

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Service endpoint settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Static credentials sent with every call
    #[serde(default)]
    pub auth: Option<Credentials>,
    /// Polling settings for long-running jobs
    #[serde(default)]
    pub async_jobs: AsyncJobConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Service endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL requests are POSTed to
    pub url: String,
    /// Request timeout in milliseconds; absent or `0` disables the timeout
    pub timeout_ms: Option<u64>,
    /// Service version selector (e.g. "release", "beta", a git hash)
    pub service_version: Option<String>,
    /// Accept self-signed or otherwise invalid TLS certificates
    pub trust_all_certificates: bool,
    /// Send the `Authorization` token over plain `http://` to hosts other
    /// than the local machine
    pub allow_insecure_http: bool,
}

/// Polling settings for long-running jobs
///
/// The first check happens after `check_time_ms`; each following interval
/// is `scale_percent` of the previous one, never exceeding `max_time_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncJobConfig {
    /// Initial check interval in milliseconds
    pub check_time_ms: u64,
    /// Growth of the interval between checks, in percent
    pub scale_percent: u64,
    /// Upper bound of the interval in milliseconds
    pub max_time_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, warn, error, `client=trace`)
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_ms: None,
            service_version: None,
            trust_all_certificates: false,
            allow_insecure_http: false,
        }
    }
}

impl ServiceConfig {
    /// The request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

impl Default for AsyncJobConfig {
    fn default() -> Self { Self { check_time_ms: 100, scale_percent: 150, max_time_ms: 300_000 } }
}

impl AsyncJobConfig {
    /// The sequence of intervals between job status checks.
    pub fn schedule(&self) -> PollSchedule { PollSchedule::new(*self) }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/fba-tools/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("fba-tools");
        Ok(config_dir.join("config.toml"))
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// when present and the built-in defaults are used otherwise. The
    /// environment is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Ok(default) if default.exists() => Self::from_file(default)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Overrides values from `FBA_TOOLS_*` environment variables.
    ///
    /// Unparseable numeric and boolean values are ignored.
    pub fn apply_env(&mut self) {
        fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok().and_then(|s| s.parse().ok())
        }

        if let Ok(url) = std::env::var(ENV_URL) {
            self.service.url = url;
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            self.auth.get_or_insert_with(Credentials::default).token = Some(token);
        }
        if let Some(timeout_ms) = parse_env(ENV_TIMEOUT_MS) {
            self.service.timeout_ms = Some(timeout_ms);
        }
        if let Ok(version) = std::env::var(ENV_SERVICE_VERSION) {
            self.service.service_version = Some(version);
        }
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(allow) = parse_env(ENV_ALLOW_INSECURE_HTTP) {
            self.service.allow_insecure_http = allow;
        }
    }

    /// The configured static token, if any.
    pub fn token(&self) -> Option<&str> { self.auth.as_ref().and_then(Credentials::token) }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    fn clear_env() {
        for key in [
            ENV_URL,
            ENV_TOKEN,
            ENV_TIMEOUT_MS,
            ENV_SERVICE_VERSION,
            ENV_LOG_LEVEL,
            ENV_ALLOW_INSECURE_HTTP,
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [service]
            url = "https://kbase.us/services/fba_tools"
            timeout_ms = 1800000
            service_version = "release"

            [auth]
            token = "ABCDEF"
            user_id = "someone"

            [logging]
            level = "debug"
            file = "fba.log"
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded = Config::from_file(&temp_file).expect("Failed to load config");
        assert_eq!(loaded.service.url, "https://kbase.us/services/fba_tools");
        assert_eq!(loaded.service.timeout(), Some(Duration::from_secs(1800)));
        assert_eq!(loaded.service.service_version.as_deref(), Some("release"));
        assert!(!loaded.service.trust_all_certificates);
        assert_eq!(loaded.token(), Some("ABCDEF"));
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.file, Some(PathBuf::from("fba.log")));
        assert_eq!(loaded.async_jobs, AsyncJobConfig::default());

        // Test file not found error
        let result = Config::from_file("nonexistent_file.toml");
        match result.expect_err("Expected error for nonexistent file") {
            ConfigError::FileRead(_) => {}
            other => panic!("Expected FileRead error, got {:?}", other),
        }

        // Test parse error
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "invalid toml content").expect("Failed to write invalid TOML");
        match Config::from_file(&temp_file).expect_err("Expected parse error for invalid TOML") {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let loaded = Config::from_file(&temp_file).expect("empty file parses");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_save_round_trip() {
        let mut config = Config::default();
        config.service.trust_all_certificates = true;
        config.auth = Some(Credentials::with_token("secret"));

        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        config.save(&temp_file).expect("save succeeds");

        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains(DEFAULT_URL));
        assert!(contents.contains("check_time_ms = 100"));

        assert_eq!(Config::from_file(&temp_file).expect("reloads"), config);

        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let missing = temp_dir.path().join("nonexistent").join("config.toml");
        match config.save(&missing).expect_err("Expected write error") {
            ConfigError::FileRead(_) => (),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        let path_str = path.to_str().expect("Path should be valid UTF-8");
        assert!(path_str.contains("fba-tools"));
        assert!(path_str.ends_with("config.toml"));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let service = ServiceConfig { timeout_ms: Some(0), ..Default::default() };
        assert_eq!(service.timeout(), None);
        assert_eq!(ServiceConfig::default().timeout(), None);
    }

    #[test]
    #[serial]
    fn test_apply_env() {
        clear_env();
        std::env::set_var(ENV_URL, "http://test:9999");
        std::env::set_var(ENV_TOKEN, "env-token");
        std::env::set_var(ENV_TIMEOUT_MS, "5000");
        std::env::set_var(ENV_SERVICE_VERSION, "dev");
        std::env::set_var(ENV_ALLOW_INSECURE_HTTP, "true");

        let mut config = Config::default();
        config.apply_env();
        assert!(config.service.allow_insecure_http);
        assert_eq!(config.service.url, "http://test:9999");
        assert_eq!(config.token(), Some("env-token"));
        assert_eq!(config.service.timeout_ms, Some(5000));
        assert_eq!(config.service.service_version.as_deref(), Some("dev"));

        std::env::set_var(ENV_TIMEOUT_MS, "soon");
        std::env::set_var(ENV_ALLOW_INSECURE_HTTP, "yes");
        let mut config = Config::default();
        config.apply_env();
        assert_eq!(config.service.timeout_ms, None);
        assert!(!config.service.allow_insecure_http);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_explicit_path() {
        clear_env();
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "[service]\nurl = \"http://from-file\"\n").expect("write");

        let loaded = Config::load(Some(temp_file.path())).expect("loads");
        assert_eq!(loaded.service.url, "http://from-file");

        std::env::set_var(ENV_URL, "http://from-env");
        let loaded = Config::load(Some(temp_file.path())).expect("loads");
        assert_eq!(loaded.service.url, "http://from-env");
        clear_env();

        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let missing = temp_dir.path().join("missing.toml");
        match Config::load(Some(&missing)).expect_err("missing file") {
            ConfigError::NotFound(path) => assert_eq!(path, missing),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }
}

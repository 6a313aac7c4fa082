#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging utilities for the fba-tools client.
//!
//! Library crates emit `tracing` events; binaries call [`init`] once to
//! install a formatting subscriber driven by [`LoggingConfig`].

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

pub use config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        /// Path from the configuration
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The level is not a valid filter directive
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel {
        /// The rejected directive
        level: String,
        /// Parser message
        reason: String,
    },
    /// A global subscriber is already installed
    #[error("Logging already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Installs the global subscriber.
///
/// `RUST_LOG`, when set and valid, takes precedence over `config.level`.
/// Events go to `config.file` (appended) or to stderr.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer(config)?)
        .with_ansi(config.file.is_none())
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialised(e.to_string()))
}

/// Parses a level or directive list such as `debug` or `info,client=trace`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter, LoggingError> {
    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile { path: path.clone(), source })?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

/// Emits a trace event tagged with `module`.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module = module, "{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("warn,client=debug,fba_tools_http=trace").is_ok());

        match build_filter("client=loudest").expect_err("invalid level") {
            LoggingError::InvalidLevel { level, .. } => assert_eq!(level, "client=loudest"),
            other => panic!("Expected InvalidLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_file_writer() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("fba-tools.log");

        let config = LoggingConfig { level: "debug".to_string(), file: Some(path.clone()) };
        assert!(make_writer(&config).is_ok());
        assert!(path.exists());

        let config = LoggingConfig {
            level: "debug".to_string(),
            file: Some(temp_dir.path().join("missing").join("fba-tools.log")),
        };
        match make_writer(&config).err().expect("missing directory") {
            LoggingError::LogFile { .. } => {}
            other => panic!("Expected LogFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_trace_without_subscriber() { trace("logging", "no subscriber installed"); }
}

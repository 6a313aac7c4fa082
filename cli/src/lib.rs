#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Argument parsing and command implementations for the `fba-tools` binary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use client::FbaToolsClient;
use config::Config;
use serde_json::Value;
use thiserror::Error;
use transport::{Credentials, RpcContext};
use types::{Method, MethodCategory};

/// Errors raised while turning command-line input into a call.
#[derive(Debug, Error)]
pub enum CliError {
    /// A JSON argument did not parse.
    #[error("Invalid JSON in {source_name}: {reason}")]
    InvalidJson {
        /// Where the text came from (`--params`, a file path, ...).
        source_name: String,
        /// Parser message.
        reason: String,
    },
    /// The parameters file could not be read.
    #[error("Failed to read {path}: {source}")]
    ParamsFile {
        /// The file given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Both `--params` and `--params-file` were given.
    #[error("--params and --params-file are mutually exclusive")]
    ConflictingParams,
    /// `--category` named no known category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result type alias for CLI helpers.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line interface for the `fba_tools` service.
#[derive(Parser, Debug)]
#[command(name = "fba-tools", about = "Call the fba_tools metabolic-modeling service", version)]
pub struct Cli {
    /// Connection and logging overrides
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Command to run
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Options shared by every command; they override the config file and
/// `FBA_TOOLS_*` environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to the per-user config file when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Service URL
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Authorization token
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Request timeout in milliseconds; 0 disables it
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
    /// Service version selector (release, beta, dev or a git hash)
    #[arg(long, global = true)]
    pub service_version: Option<String>,
    /// Log level or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Send the token over plain HTTP to remote hosts
    #[arg(long, global = true)]
    pub allow_insecure_http: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the remote methods
    Methods {
        /// Only list methods of this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Call a remote method by name with JSON parameters
    Call {
        /// Method name, bare or prefixed with `fba_tools.`
        method: String,
        /// Parameter object, or a JSON array of positional arguments
        #[arg(long)]
        params: Option<String>,
        /// File holding the parameters as JSON
        #[arg(long)]
        params_file: Option<PathBuf>,
        /// Call context forwarded to the service
        #[arg(long)]
        context: Option<String>,
    },
    /// Report the service state and version
    Status,
    /// Print the effective configuration as TOML
    Config,
}

impl GlobalArgs {
    /// Resolves the configuration: flags over environment over file over
    /// built-in defaults.
    pub fn resolve(&self) -> std::result::Result<Config, config::ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Writes the flags that were given into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.service.url = url.clone();
        }
        if let Some(token) = &self.token {
            config.auth.get_or_insert_with(Credentials::default).token = Some(token.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.service.timeout_ms = Some(timeout_ms);
        }
        if let Some(version) = &self.service_version {
            config.service.service_version = Some(version.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.allow_insecure_http {
            config.service.allow_insecure_http = true;
        }
    }
}

fn parse_json(text: &str, source_name: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| CliError::InvalidJson {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

/// Builds the positional argument list from `--params` or `--params-file`.
///
/// A JSON array is taken as the argument list itself; any other value is
/// the single argument. No parameters yields an empty list.
pub fn load_params(params: Option<&str>, params_file: Option<&Path>) -> Result<Vec<Value>> {
    let value = match (params, params_file) {
        (Some(_), Some(_)) => return Err(CliError::ConflictingParams),
        (Some(text), None) => parse_json(text, "--params")?,
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .map_err(|source| CliError::ParamsFile { path: path.to_path_buf(), source })?;
            parse_json(&text, &path.display().to_string())?
        }
        (None, None) => return Ok(Vec::new()),
    };

    Ok(match value {
        Value::Array(args) => args,
        other => vec![other],
    })
}

/// Parses `--context`.
pub fn load_context(context: Option<&str>) -> Result<Option<RpcContext>> {
    context.map(|text| parse_json(text, "--context").map(RpcContext::new)).transpose()
}

fn parse_category(name: &str) -> Result<MethodCategory> {
    const CATEGORIES: [MethodCategory; 7] = [
        MethodCategory::Reconstruction,
        MethodCategory::Analysis,
        MethodCategory::Editing,
        MethodCategory::Import,
        MethodCategory::Export,
        MethodCategory::Bulk,
        MethodCategory::Service,
    ];
    CATEGORIES
        .into_iter()
        .find(|c| c.display_name().eq_ignore_ascii_case(name))
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

/// Renders the method table, optionally filtered by category.
pub fn render_methods(category: Option<&str>) -> Result<String> {
    let category = category.map(parse_category).transpose()?;
    let methods: Vec<Method> = Method::ALL
        .iter()
        .copied()
        .filter(|m| category.map_or(true, |c| m.category() == c))
        .collect();

    let width = methods.iter().map(|m| m.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for method in methods {
        let param = match (method.param_name(), method.param_type()) {
            (Some(name), Some(ty)) => format!("{}: {}", name, ty),
            _ => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:<14}  ({}) -> {}",
            method.name(),
            method.category().display_name(),
            param,
            method.result_type(),
            width = width
        );
    }
    Ok(out)
}

/// The configuration as printed by `config`, with the token masked.
pub fn render_config(config: &Config) -> std::result::Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if let Some(auth) = shown.auth.as_mut() {
        if auth.token().is_some() {
            auth.token = Some("********".to_string());
        }
    }
    toml::to_string_pretty(&shown)
}

/// Runs one parsed command, printing its output to stdout.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.cmd {
        Commands::Methods { category } => {
            print!("{}", render_methods(category.as_deref())?);
        }
        Commands::Call { method, params, params_file, context } => {
            let args = load_params(params.as_deref(), params_file.as_deref())?;
            let context = load_context(context.as_deref())?;
            let client = FbaToolsClient::from_config(&config)?;
            tracing::info!(method = %method, url = client.url(), "calling");

            let value = client.invoker().invoke_by_name(&method, args, context)?.await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Status => {
            let client = FbaToolsClient::from_config(&config)?;
            let status = client.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Config => {
            print!("{}", render_config(&config)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_params() {
        assert!(load_params(None, None).expect("no params").is_empty());

        let args = load_params(Some(r#"{"input_ref": "1/2/3"}"#), None).expect("object");
        assert_eq!(args, vec![json!({"input_ref": "1/2/3"})]);

        let args = load_params(Some(r#"[{"a": 1}, {"b": 2}]"#), None).expect("array");
        assert_eq!(args.len(), 2);

        assert!(matches!(
            load_params(Some("{not json"), None),
            Err(CliError::InvalidJson { source_name, .. }) if source_name == "--params"
        ));
    }

    #[test]
    fn test_load_params_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temporary file");
        write!(file, r#"{{"workspace_name": "ws", "model_name": "m"}}"#).expect("write");

        let args = load_params(None, Some(file.path())).expect("file params");
        assert_eq!(args, vec![json!({"workspace_name": "ws", "model_name": "m"})]);

        assert!(matches!(
            load_params(Some("{}"), Some(file.path())),
            Err(CliError::ConflictingParams)
        ));
        assert!(matches!(
            load_params(None, Some(Path::new("/nonexistent/params.json"))),
            Err(CliError::ParamsFile { .. })
        ));
    }

    #[test]
    fn test_load_context() {
        assert!(load_context(None).expect("none").is_none());
        let context = load_context(Some(r#"{"provenance": []}"#)).expect("parses");
        assert_eq!(context.map(RpcContext::into_value), Some(json!({"provenance": []})));
    }

    #[test]
    fn test_render_methods() {
        let all = render_methods(None).expect("renders");
        assert_eq!(all.lines().count(), Method::ALL.len());
        assert!(all.contains("run_flux_balance_analysis"));
        assert!(all.contains(
            "(params: RunFluxBalanceAnalysisParams) -> RunFluxBalanceAnalysisResults"
        ));
        assert!(all.contains("(-) -> ServiceStatus"));

        let service = render_methods(Some("Service")).expect("renders");
        assert_eq!(service.lines().count(), 1);
        assert!(service.starts_with("status"));

        assert!(matches!(render_methods(Some("cooking")), Err(CliError::UnknownCategory(_))));
    }

    #[test]
    fn test_apply_flags() {
        let mut config = Config::default();
        let flags = GlobalArgs {
            url: Some("http://example.org".to_string()),
            token: Some("secret".to_string()),
            timeout_ms: Some(0),
            log_level: Some("debug".to_string()),
            allow_insecure_http: true,
            ..GlobalArgs::default()
        };
        flags.apply(&mut config);

        assert_eq!(config.service.url, "http://example.org");
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.service.timeout(), None);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.service.service_version, None);
        assert!(config.service.allow_insecure_http);

        let mut config = Config::default();
        config.service.allow_insecure_http = true;
        GlobalArgs::default().apply(&mut config);
        assert!(config.service.allow_insecure_http);
    }

    #[test]
    fn test_render_config_masks_token() {
        let mut config = Config::default();
        config.auth = Some(Credentials::with_token("secret"));
        let rendered = render_config(&config).expect("renders");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("********"));
        assert!(rendered.contains("http://localhost:5000"));
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "fba-tools",
            "call",
            "edit_media",
            "--params",
            "{}",
            "--url",
            "http://x",
        ])
        .expect("parses");
        assert_eq!(cli.global.url.as_deref(), Some("http://x"));
        match cli.cmd {
            Commands::Call { method, params, .. } => {
                assert_eq!(method, "edit_media");
                assert_eq!(params.as_deref(), Some("{}"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

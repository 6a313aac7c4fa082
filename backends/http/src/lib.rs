#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `fba-tools-http` — HTTP Transport Backend for fba-tools
//!
//! This crate provides a concrete HTTP-based implementation of the
//! [`transport::Transport`] trait, carrying JSON-RPC 1.1 requests to the
//! `fba_tools` service.
//!
//! ## Overview
//!
//! - Implements [`HttpTransport`], a thin wrapper over [`reqwest::Client`]
//! - POSTs the serialized envelope as the raw request body
//! - Attaches `Authorization: <token>` whenever a token can be resolved,
//!   refusing to send it over plain `http://` to a non-loopback host unless
//!   [`HttpTransport::with_insecure_http_allowed`] permits it
//! - Normalizes every outcome into the `result` array or an [`RpcError`]
//!
//! ## Response mapping
//!
//! | Outcome                                   | Result                                   |
//! |-------------------------------------------|------------------------------------------|
//! | 2xx, JSON body with a `result` array      | `Ok(result)`                             |
//! | 2xx, body not JSON / no `result` array    | [`RpcError::InvalidResponse`] (503)      |
//! | 2xx, body with a non-null `error`         | [`RpcError::InvalidResponse`] (503)      |
//! | non-2xx, JSON body                        | [`RpcError::Rpc`] (500) with `error`     |
//! | non-2xx, non-JSON body                    | 500, `"Unknown error - <body>"`          |
//! | non-2xx, empty body                       | 500, `"Unknown Error"`                   |
//! | no response (refused, timed out, …)       | [`RpcError::Connection`] (500)           |
//!
//! ## Example
//! ```no_run
//! use fba_tools_http::HttpTransport;
//! use transport::{Credentials, RpcRequest, Transport};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = HttpTransport::new("https://kbase.us/services/fba_tools")
//!     .with_credentials(Credentials::with_token("my-token"));
//!
//! let result = transport.send(&RpcRequest::new("fba_tools.status", vec![])).await.unwrap();
//! println!("{:#?}", result);
//! # });
//! ```

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use config::Config;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use transport::{
    Credentials, RpcError, RpcRequest, TokenSource, TokenSupplier, Transport, UNKNOWN_ERROR,
};

/// A concrete implementation of the [`Transport`] trait using HTTP.
///
/// The underlying [`reqwest::Client`] pools connections and is cheap to
/// clone, so one `HttpTransport` can serve any number of concurrent calls.
///
/// `HttpTransport` performs no result typing: it returns the `result`
/// array of the response as raw [`serde_json::Value`]s.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client used to perform requests.
    client: reqwest::Client,
    /// The service URL requests are POSTed to.
    url: String,
    /// Where the `Authorization` header comes from.
    tokens: TokenSource,
    /// Per-request timeout; `None` waits indefinitely.
    timeout: Option<Duration>,
    /// Whether a token may travel over plain HTTP to a remote host.
    allow_insecure_http: bool,
}

impl HttpTransport {
    /// Constructs an unauthenticated transport targeting `url`, without a
    /// timeout.
    ///
    /// # Example
    /// ```
    /// use fba_tools_http::HttpTransport;
    /// use transport::Transport;
    ///
    /// let transport = HttpTransport::new("http://127.0.0.1:5000");
    /// assert_eq!(transport.endpoint(), "http://127.0.0.1:5000");
    /// ```
    pub fn new(url: impl Into<String>) -> Self { Self::with_client(reqwest::Client::new(), url) }

    fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        let url = url.into();
        logging::trace("HTTP", &format!("→ initializing HTTP transport for {}", url));
        Self {
            client,
            url,
            tokens: TokenSource::anonymous(),
            timeout: None,
            allow_insecure_http: false,
        }
    }

    /// Constructs a transport that accepts invalid TLS certificates when
    /// `trust_all_certificates` is set.
    ///
    /// # Errors
    /// [`RpcError::Configuration`] if the HTTP client cannot be built.
    pub fn with_tls_options(
        url: impl Into<String>,
        trust_all_certificates: bool,
    ) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(trust_all_certificates)
            .build()
            .map_err(|e| RpcError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        if trust_all_certificates {
            tracing::warn!("HTTP Transport - TLS certificate validation disabled");
        }
        Ok(Self::with_client(client, url))
    }

    /// Builds the transport described by the `[service]` and `[auth]`
    /// sections of `config`.
    pub fn from_config(config: &Config) -> Result<Self, RpcError> {
        let mut transport =
            Self::with_tls_options(&config.service.url, config.service.trust_all_certificates)?
                .with_timeout(config.service.timeout())
                .with_insecure_http_allowed(config.service.allow_insecure_http);
        if let Some(credentials) = &config.auth {
            transport = transport.with_credentials(credentials.clone());
        }
        Ok(transport)
    }

    /// Replaces the token source.
    pub fn with_token_source(mut self, tokens: TokenSource) -> Self {
        self.tokens = tokens;
        self
    }

    /// Uses static `credentials`; an installed supplier still takes precedence.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.tokens = self.tokens.with_credentials(credentials);
        self
    }

    /// Asks `supplier` for the token on every request.
    pub fn with_token_supplier(mut self, supplier: TokenSupplier) -> Self {
        self.tokens = self.tokens.with_supplier(supplier);
        self
    }

    /// Sets the per-request timeout. A zero duration disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Permits sending the token over plain `http://` to hosts other than
    /// the local machine. Off by default.
    pub fn with_insecure_http_allowed(mut self, allowed: bool) -> Self {
        self.allow_insecure_http = allowed;
        self
    }

    /// Whether tokens may be sent over plain HTTP to remote hosts.
    pub fn insecure_http_allowed(&self) -> bool { self.allow_insecure_http }

    /// The token source consulted for each request.
    pub fn tokens(&self) -> &TokenSource { &self.tokens }

    /// The per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> { self.timeout }

    /// Maps a 2xx body onto the `result` array.
    ///
    /// Anything but a `result` array, including an `error` member, cannot be
    /// decoded as a successful reply.
    fn parse_success(&self, body: &str) -> Result<Vec<Value>, RpcError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RpcError::invalid_response(e.to_string(), &self.url, body))?;

        if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
            let reason = format!("success status with an `error` member: {}", error);
            return Err(RpcError::invalid_response(reason, &self.url, body));
        }

        match value.get("result") {
            Some(Value::Array(result)) => Ok(result.clone()),
            Some(_) => Err(RpcError::invalid_response("`result` is not an array", &self.url, body)),
            None => Err(RpcError::invalid_response("missing `result`", &self.url, body)),
        }
    }
}

/// True when `url` is plain HTTP to a host other than the local machine.
///
/// URLs that do not parse are left to fail in the HTTP client.
fn is_insecure_remote(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    if !parsed.scheme().eq_ignore_ascii_case("http") {
        return false;
    }
    match parsed.host_str() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => false,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map_or(true, |ip| !ip.is_loopback()),
        None => true,
    }
}

/// Extracts the error detail from a non-2xx body.
///
/// The `error` member is preferred; a JSON body without one is surfaced
/// whole.
fn extract_error(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::String(UNKNOWN_ERROR.to_string());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut map)) => match map.remove("error") {
            Some(error) => error,
            None => Value::Object(map),
        },
        Ok(other) => other,
        Err(_) => Value::String(format!("Unknown error - {}", body)),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// POSTs one JSON-RPC 1.1 envelope and returns the `result` array.
    ///
    /// # Errors
    /// - [`RpcError::Serialization`] if the request cannot be encoded
    /// - [`RpcError::Configuration`] if a token would travel over plain HTTP
    ///   to a remote host without [`HttpTransport::with_insecure_http_allowed`]
    /// - [`RpcError::Connection`] if no response arrives (refused, timeout)
    /// - [`RpcError::Rpc`] for a non-success status
    /// - [`RpcError::InvalidResponse`] if a success body does not carry a
    ///   `result` array
    async fn send(&self, request: &RpcRequest) -> Result<Vec<Value>, RpcError> {
        let token = self.tokens.resolve();
        if token.is_some() && !self.allow_insecure_http && is_insecure_remote(&self.url) {
            tracing::error!(url = %self.url, "HTTP Transport - refusing to send token over HTTP");
            return Err(RpcError::Configuration(format!(
                "Refusing to send the authorization token over insecure HTTP to {}; \
                 use https or allow insecure HTTP explicitly",
                self.url
            )));
        }

        let body = request.to_json()?;
        logging::trace("HTTP", &format!("→ POST {} (method: {})", self.url, request.method));
        tracing::debug!(
            url = %self.url,
            method = %request.method,
            id = %request.id,
            "sending request"
        );

        let mut req =
            self.client.post(&self.url).header(CONTENT_TYPE, "application/json").body(body);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("HTTP Transport - Request failed: {}", e);
            RpcError::connection(e.to_string(), e.is_timeout())
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("HTTP Transport - Failed to read body: {}", e);
            RpcError::connection(e.to_string(), e.is_timeout())
        })?;

        if status.is_success() {
            self.parse_success(&text).map_err(|e| {
                tracing::warn!(method = %request.method, "HTTP Transport - {}", e);
                e
            })
        } else {
            tracing::warn!(
                method = %request.method,
                http_status = status.as_u16(),
                "HTTP Transport - service returned an error"
            );
            Err(RpcError::rpc(extract_error(&text)))
        }
    }

    /// Returns the configured service URL.
    fn endpoint(&self) -> &str { &self.url }
}

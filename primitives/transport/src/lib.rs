#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `fba-tools-transport` — Foundational Communication Layer
//!
//! This crate defines the **core transport abstraction** used by the
//! fba-tools client.
//!
//! It provides the interface (`Transport` trait) through which every
//! JSON-RPC 1.1 request reaches the `fba_tools` service. The production
//! backend lives in `fba-tools-http`; tests plug in in-memory transports.
//!
//! ## Core Concepts
//!
//! ### `Transport` Trait
//! Sends one [`RpcRequest`] and returns the `result` array of the
//! response as raw [`serde_json::Value`]s. Selecting the surfaced value
//! (first element or whole array) is left to the caller via [`Returns`].
//!
//! ### `RpcError`
//! The single error type for a call, covering local argument failures,
//! HTTP failures (status 500), undecodable responses (status 503), and
//! aborted calls. [`RpcError::status`] exposes the numeric status.
//!
//! ### `DynTransport`
//! A type-erased (`Arc<dyn Transport>`) wrapper for sharing one transport
//! between many concurrent calls.
//!
//! ### Credentials
//! [`Credentials`] holds a static token, [`TokenSupplier`] wraps a callback
//! asked for a fresh token on every call. [`TokenSource`] resolves which
//! one applies.
//!
//! ## Example
//! ```no_run
//! use transport::{DynTransport, Returns, RpcError, RpcRequest};
//!
//! async fn demo(transport: DynTransport) -> Result<(), RpcError> {
//!     let request = RpcRequest::new("fba_tools.status", vec![]);
//!     let result = transport.send(&request).await?;
//!     println!("status = {}", Returns::Single.select(result));
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

mod auth;
mod envelope;

pub use auth::{Credentials, TokenSource, TokenSupplier};
pub use envelope::{new_request_id, RpcContext, RpcRequest, JSONRPC_VERSION};

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Status reported when the service answered with a non-success HTTP code
/// or could not be reached at all.
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Status reported when a successful HTTP response could not be decoded.
pub const STATUS_INVALID_RESPONSE: u16 = 503;

/// Error value used when a failed response carries no usable body.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Canonical error type for a single RPC call.
///
/// Local variants (`InvalidArgument`, `TooManyArguments`, `UnknownMethod`,
/// `Serialization`) are raised before any network activity. The remaining
/// variants describe how an issued request settled.
#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    /// A positional argument had the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// More positional arguments were supplied than the method declares.
    #[error("Too many arguments ({given} instead of {allowed})")]
    TooManyArguments {
        /// Number of arguments supplied.
        given: usize,
        /// Number of arguments the method accepts.
        allowed: usize,
    },

    /// The method name is not part of the service catalogue.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The request could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The transport could not be set up (e.g. TLS backend initialisation).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service answered with a non-success HTTP status.
    ///
    /// `error` is the `error` member of the response body when it parsed,
    /// otherwise a substituted "Unknown Error" message.
    #[error("RPC error ({status}): {error}")]
    Rpc {
        /// Always [`STATUS_SERVER_ERROR`].
        status: u16,
        /// Extracted or substituted error detail.
        error: Value,
    },

    /// No HTTP response was received (connection failure or timeout).
    #[error("Connection error ({status}): {error} ({cause})")]
    Connection {
        /// Always [`STATUS_SERVER_ERROR`].
        status: u16,
        /// Always [`UNKNOWN_ERROR`].
        error: String,
        /// Diagnostic text from the HTTP client.
        cause: String,
        /// Whether the configured timeout elapsed.
        timed_out: bool,
    },

    /// A successful HTTP response could not be decoded.
    #[error("Invalid response ({status}) from {url}: {error}")]
    InvalidResponse {
        /// Always [`STATUS_INVALID_RESPONSE`].
        status: u16,
        /// The decode failure.
        error: String,
        /// The endpoint that produced the response.
        url: String,
        /// The raw response body.
        body: String,
    },

    /// The in-flight call was aborted before it settled.
    #[error("Call aborted: {0}")]
    Aborted(String),
}

impl RpcError {
    /// Builds the error for a non-success HTTP response carrying `error`.
    pub fn rpc(error: impl Into<Value>) -> Self {
        RpcError::Rpc { status: STATUS_SERVER_ERROR, error: error.into() }
    }

    /// Builds the error for a request that never produced a response.
    pub fn connection(cause: impl Into<String>, timed_out: bool) -> Self {
        RpcError::Connection {
            status: STATUS_SERVER_ERROR,
            error: UNKNOWN_ERROR.to_string(),
            cause: cause.into(),
            timed_out,
        }
    }

    /// Builds the error for a response body that could not be decoded.
    pub fn invalid_response(
        error: impl Into<String>,
        url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        RpcError::InvalidResponse {
            status: STATUS_INVALID_RESPONSE,
            error: error.into(),
            url: url.into(),
            body: body.into(),
        }
    }

    /// Numeric status of a settled call, or `None` for local failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::Rpc { status, .. }
            | RpcError::Connection { status, .. }
            | RpcError::InvalidResponse { status, .. } => Some(*status),
            RpcError::InvalidArgument(_)
            | RpcError::TooManyArguments { .. }
            | RpcError::UnknownMethod(_)
            | RpcError::Serialization(_)
            | RpcError::Configuration(_)
            | RpcError::Aborted(_) => None,
        }
    }

    /// Whether the error was raised locally, before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            RpcError::InvalidArgument(_)
                | RpcError::TooManyArguments { .. }
                | RpcError::UnknownMethod(_)
                | RpcError::Serialization(_)
                | RpcError::Configuration(_)
        )
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self { RpcError::Serialization(err.to_string()) }
}

/// How many of the returned values a method surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Returns {
    /// Exactly one return value is expected; surface `result[0]`.
    #[default]
    Single,
    /// Surface the full `result` array.
    All,
}

impl Returns {
    /// Maps a declared return-value count onto a `Returns` shape.
    pub fn from_count(count: usize) -> Self {
        if count == 1 {
            Returns::Single
        } else {
            Returns::All
        }
    }

    /// Picks the surfaced value out of a `result` array.
    ///
    /// An empty array under `Single` yields JSON `null`.
    pub fn select(self, mut result: Vec<Value>) -> Value {
        match self {
            Returns::Single if result.is_empty() => Value::Null,
            Returns::Single => result.swap_remove(0),
            Returns::All => Value::Array(result),
        }
    }
}

/// The transport seam between the invoker and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a single JSON-RPC request.
    ///
    /// Implementations return the `result` array of a successful response
    /// or the [`RpcError`] describing how the call failed. Exactly one
    /// request is issued; implementations never retry.
    async fn send(&self, request: &RpcRequest) -> Result<Vec<Value>>;

    /// Returns the configured endpoint.
    ///
    /// For network transports, this is the service URL. For in-memory
    /// transports, it may be a symbolic name.
    fn endpoint(&self) -> &str;
}

/// Type alias for a shared, dynamically dispatched transport instance.
///
/// ```
/// use transport::DynTransport;
///
/// fn describe(t: DynTransport) {
///     println!("Using endpoint: {}", t.endpoint());
/// }
/// ```
pub type DynTransport = Arc<dyn Transport>;

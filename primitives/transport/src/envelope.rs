//! JSON-RPC 1.1 request envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version tag carried by every request.
pub const JSONRPC_VERSION: &str = "1.1";

/// Opaque per-call context forwarded to the service unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcContext(Value);

impl RpcContext {
    /// Wraps an arbitrary JSON value as a call context.
    pub fn new(value: Value) -> Self { Self(value) }

    /// Borrow the wrapped JSON value.
    pub fn as_value(&self) -> &Value { &self.0 }

    /// Unwrap into the JSON value.
    pub fn into_value(self) -> Value { self.0 }
}

impl From<Value> for RpcContext {
    fn from(value: Value) -> Self { Self(value) }
}

/// A single JSON-RPC 1.1 request.
///
/// Serializes as
/// `{"params": [...], "method": "...", "version": "1.1", "id": "...", "context": ...}`
/// with `context` omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Positional parameters (zero or one for every `fba_tools` method).
    pub params: Vec<Value>,
    /// Fully qualified method name, e.g. `fba_tools.status`.
    pub method: String,
    /// Always [`JSONRPC_VERSION`].
    pub version: String,
    /// Random decimal correlation id.
    pub id: String,
    /// Optional context passed through to the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<RpcContext>,
}

impl RpcRequest {
    /// Builds a request with a fresh correlation id and no context.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            params,
            method: method.into(),
            version: JSONRPC_VERSION.to_string(),
            id: new_request_id(),
            context: None,
        }
    }

    /// Attaches (or clears) the call context.
    pub fn with_context(mut self, context: Option<RpcContext>) -> Self {
        self.context = context;
        self
    }

    /// Serializes the envelope to its JSON wire form.
    pub fn to_json(&self) -> crate::Result<String> { Ok(serde_json::to_string(self)?) }
}

/// Generates a random decimal correlation id.
pub fn new_request_id() -> String { rand::random::<u64>().to_string() }

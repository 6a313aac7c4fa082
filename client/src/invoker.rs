//! The generic request function every remote method goes through.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use transport::{DynTransport, Result, Returns, RpcContext, RpcError, RpcRequest, Transport};
use types::Method;

use crate::PendingCall;

/// Issues JSON-RPC 1.1 calls over a shared transport.
///
/// Each call is spawned as its own tokio task and handed back as a
/// [`PendingCall`]; calls made from one invoker may run concurrently and
/// complete in any order. The invoker itself holds only immutable state and
/// is cheap to clone.
#[derive(Clone)]
pub struct RpcInvoker {
    transport: DynTransport,
    context: Option<RpcContext>,
}

impl fmt::Debug for RpcInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcInvoker")
            .field("transport", &self.transport.endpoint())
            .field("context", &self.context)
            .finish()
    }
}

impl RpcInvoker {
    /// Wraps an existing transport.
    pub fn new(transport: DynTransport) -> Self { Self { transport, context: None } }

    /// Wraps a concrete transport.
    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }

    /// Attaches `context` to every call that does not supply its own.
    pub fn with_context(mut self, context: Option<RpcContext>) -> Self {
        self.context = context;
        self
    }

    /// Swaps the transport, keeping the default context.
    pub fn with_transport(mut self, transport: DynTransport) -> Self {
        self.transport = transport;
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &DynTransport { &self.transport }

    /// The endpoint calls are sent to.
    pub fn endpoint(&self) -> &str { self.transport.endpoint() }

    /// The default call context.
    pub fn context(&self) -> Option<&RpcContext> { self.context.as_ref() }

    /// Sends `method` with positional `params` and surfaces the raw result.
    ///
    /// `returns` selects between the first returned value and the whole
    /// `result` array. Must be called from within a tokio runtime.
    pub fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
        returns: Returns,
        context: Option<RpcContext>,
    ) -> PendingCall<Value> {
        self.invoke_as(method, params, returns, context)
    }

    /// Like [`invoke`](Self::invoke), decoding the surfaced value into `R`.
    ///
    /// A value that does not decode settles the call with
    /// [`RpcError::InvalidResponse`] carrying the offending JSON.
    pub fn invoke_as<R>(
        &self,
        method: &str,
        params: Vec<Value>,
        returns: Returns,
        context: Option<RpcContext>,
    ) -> PendingCall<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let context = context.or_else(|| self.context.clone());
        let request = RpcRequest::new(method, params).with_context(context);
        let transport = Arc::clone(&self.transport);

        tracing::debug!(method = %request.method, id = %request.id, "invoking");
        PendingCall::spawned(tokio::spawn(async move {
            let result = transport.send(&request).await.map_err(|e| {
                tracing::debug!(
                    method = %request.method,
                    status = ?e.status(),
                    "call failed: {}",
                    e
                );
                e
            })?;
            decode(returns.select(result), transport.endpoint())
        }))
    }

    /// Calls a catalogue method by name with untyped arguments.
    ///
    /// `name` may be bare (`status`) or qualified (`fba_tools.status`).
    /// The arguments are checked before any request is issued:
    ///
    /// # Errors
    /// - [`RpcError::UnknownMethod`] if `name` is not in the catalogue
    /// - [`RpcError::TooManyArguments`] if more arguments than the method
    ///   declares are given
    /// - [`RpcError::InvalidArgument`] if the parameter is not a JSON object
    ///
    /// Omitted arguments are sent as `null`, so `params` always holds as
    /// many entries as the method declares.
    pub fn invoke_by_name(
        &self,
        name: &str,
        mut args: Vec<Value>,
        context: Option<RpcContext>,
    ) -> Result<PendingCall<Value>> {
        let method: Method = name.parse().map_err(|_| RpcError::UnknownMethod(name.to_string()))?;
        check_arguments(method, &args)?;
        args.resize(method.arity(), Value::Null);
        let returns = Returns::from_count(method.return_count());
        Ok(self.invoke(method.qualified_name(), args, returns, context))
    }
}

/// Validates untyped arguments against the catalogue entry.
fn check_arguments(method: Method, args: &[Value]) -> Result<()> {
    let allowed = method.arity();
    if args.len() > allowed {
        return Err(RpcError::TooManyArguments { given: args.len(), allowed });
    }
    if let Some(arg) = args.iter().find(|a| !a.is_object()) {
        return Err(RpcError::InvalidArgument(format!(
            "Argument {} of {} must be an object, got {}",
            method.param_name().unwrap_or("params"),
            method.name(),
            json_kind(arg)
        )));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes a surfaced value; failures are reported as status 503.
fn decode<R: DeserializeOwned>(value: Value, url: &str) -> Result<R> {
    R::deserialize(&value).map_err(|e| {
        tracing::warn!(url, "failed to decode result: {}", e);
        RpcError::invalid_response(e.to_string(), url, value.to_string())
    })
}

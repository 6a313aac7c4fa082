//! Typed facade over [`RpcInvoker`], one method per catalogue entry.

use std::sync::Arc;
use std::time::Duration;

use config::{AsyncJobConfig, Config, PollSchedule};
use fba_tools_http::HttpTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use transport::{Credentials, DynTransport, Result, Returns, RpcContext, TokenSupplier};
use types::*;

use crate::{PendingCall, RpcInvoker};

/// Client for the `fba_tools` service.
///
/// Every remote method takes one typed parameter object and returns a
/// [`PendingCall`] resolving to the typed result. Clones share the
/// underlying connection pool.
///
/// ```no_run
/// use client::FbaToolsClient;
/// use types::GapfillMetabolicModelParams;
///
/// # async fn demo() -> Result<(), transport::RpcError> {
/// let client = FbaToolsClient::new("https://kbase.us/services/fba_tools")?
///     .with_token("my-token");
///
/// let params = GapfillMetabolicModelParams::new("model", "Carbon-D-Glucose", "model.gf", "ws");
/// let results = client.gapfill_metabolic_model(&params).await?;
/// println!("gapfilled {:?} reactions", results.number_gapfilled_reactions);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FbaToolsClient {
    invoker: RpcInvoker,
    http: Option<HttpTransport>,
    service_version: Option<String>,
    async_jobs: AsyncJobConfig,
}

impl FbaToolsClient {
    /// A client for the service at `url`, without credentials or timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_http(HttpTransport::with_tls_options(url, false)?))
    }

    /// A client configured from the `[service]`, `[auth]` and
    /// `[async_jobs]` sections of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::from_http(HttpTransport::from_config(config)?);
        client.service_version = config.service.service_version.clone();
        client.async_jobs = config.async_jobs;
        Ok(client)
    }

    /// A client over an arbitrary transport.
    ///
    /// The HTTP-specific builders (credentials, token supplier, timeout)
    /// have no effect on such a client; configure the transport instead.
    pub fn from_transport(transport: DynTransport) -> Self {
        Self {
            invoker: RpcInvoker::new(transport),
            http: None,
            service_version: None,
            async_jobs: AsyncJobConfig::default(),
        }
    }

    fn from_http(http: HttpTransport) -> Self {
        let mut client = Self::from_transport(Arc::new(http.clone()));
        client.http = Some(http);
        client
    }

    fn map_http(mut self, setting: &str, f: impl FnOnce(HttpTransport) -> HttpTransport) -> Self {
        match self.http.take() {
            Some(http) => {
                let http = f(http);
                self.invoker = self.invoker.with_transport(Arc::new(http.clone()));
                self.http = Some(http);
            }
            None => tracing::warn!("{} ignored: client does not use the HTTP transport", setting),
        }
        self
    }

    /// Sends `credentials` with every call unless a token supplier is set.
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        self.map_http("credentials", |http| http.with_credentials(credentials))
    }

    /// Shorthand for [`with_credentials`](Self::with_credentials) with a bare token.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_credentials(Credentials::with_token(token))
    }

    /// Asks `supplier` for the token before every call; takes precedence
    /// over static credentials.
    pub fn with_token_supplier(self, supplier: TokenSupplier) -> Self {
        self.map_http("token supplier", |http| http.with_token_supplier(supplier))
    }

    /// Sets the request timeout; zero disables it.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.map_http("timeout", |http| http.with_timeout(Some(timeout)))
    }

    /// Permits sending the token over plain `http://` to a remote host.
    pub fn with_insecure_http_allowed(self, allowed: bool) -> Self {
        self.map_http("insecure HTTP", |http| http.with_insecure_http_allowed(allowed))
    }

    /// Selects the service version.
    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Attaches `context` to every call.
    pub fn with_context(mut self, context: RpcContext) -> Self {
        self.invoker = self.invoker.with_context(Some(context));
        self
    }

    /// Replaces the async job polling settings.
    pub fn with_async_job_settings(mut self, settings: AsyncJobConfig) -> Self {
        self.async_jobs = settings;
        self
    }

    /// The service URL.
    pub fn url(&self) -> &str { self.invoker.endpoint() }

    /// The selected service version, if any.
    pub fn service_version(&self) -> Option<&str> { self.service_version.as_deref() }

    /// Polling settings for long-running jobs.
    pub fn async_job_settings(&self) -> AsyncJobConfig { self.async_jobs }

    /// The waits between job status checks under the current settings.
    pub fn poll_schedule(&self) -> PollSchedule { self.async_jobs.schedule() }

    /// The invoker behind the typed methods.
    pub fn invoker(&self) -> &RpcInvoker { &self.invoker }

    /// Report the service state, version and source revision.
    pub fn status(&self) -> PendingCall<ServiceStatus> {
        self.invoker.invoke_as(Method::Status.qualified_name(), vec![], Returns::Single, None)
    }

    /// Calls a method by name with untyped JSON arguments.
    ///
    /// See [`RpcInvoker::invoke_by_name`] for the checks applied.
    pub fn call_by_name(&self, name: &str, args: Vec<Value>) -> Result<PendingCall<Value>> {
        self.invoker.invoke_by_name(name, args, None)
    }

    fn call<P, R>(&self, method: Method, params: &P) -> PendingCall<R>
    where
        P: Serialize,
        R: DeserializeOwned + Send + 'static,
    {
        match serde_json::to_value(params) {
            Ok(value) => self.invoker.invoke_as(
                method.qualified_name(),
                vec![value],
                Returns::from_count(method.return_count()),
                None,
            ),
            Err(e) => PendingCall::failed(e.into()),
        }
    }
}

macro_rules! typed_methods {
    ($(
        $(#[$doc:meta])*
        ($variant:ident, $name:ident, $param:ident, $ptype:ident, $rtype:ident, $shape:ident, $category:ident)
    ),* $(,)?) => {
        impl FbaToolsClient {
            $(
                $(#[$doc])*
                pub fn $name(&self, $param: &$ptype) -> PendingCall<$rtype> {
                    self.call(Method::$variant, $param)
                }
            )*
        }
    };
}

types::for_each_method!(typed_methods);

//! Credential handling for outgoing requests.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Static credentials for the service.
///
/// An empty `token` is treated the same as no token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token sent verbatim as the `Authorization` header.
    #[serde(default)]
    pub token: Option<String>,
    /// The user the token belongs to (informational).
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Credentials {
    /// Credentials holding only a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), user_id: None }
    }

    /// The token, if one is set and non-empty.
    pub fn token(&self) -> Option<&str> { self.token.as_deref().filter(|t| !t.is_empty()) }
}

/// Callback asked for a fresh token on every call.
#[derive(Clone)]
pub struct TokenSupplier(Arc<dyn Fn() -> Option<String> + Send + Sync>);

impl TokenSupplier {
    /// Wraps a token-producing closure.
    pub fn new<F>(supplier: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(supplier))
    }

    /// Invokes the callback.
    pub fn fetch(&self) -> Option<String> { (self.0)() }
}

impl fmt::Debug for TokenSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSupplier").field(&"<fn>").finish()
    }
}

/// Resolves the token attached to each request.
///
/// A configured [`TokenSupplier`] always wins: its answer is used even when
/// it returns `None`. Without a supplier the static [`Credentials`] apply.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    credentials: Option<Credentials>,
    supplier: Option<TokenSupplier>,
}

impl TokenSource {
    /// A source that never yields a token.
    pub fn anonymous() -> Self { Self::default() }

    /// A source backed by static credentials.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self { credentials: Some(credentials), supplier: None }
    }

    /// Replaces the static credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Installs a per-call token supplier.
    pub fn with_supplier(mut self, supplier: TokenSupplier) -> Self {
        self.supplier = Some(supplier);
        self
    }

    /// The static credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> { self.credentials.as_ref() }

    /// Whether a per-call supplier is installed.
    pub fn has_supplier(&self) -> bool { self.supplier.is_some() }

    /// The token for the next request.
    pub fn resolve(&self) -> Option<String> {
        match &self.supplier {
            Some(supplier) => supplier.fetch(),
            None => self.credentials.as_ref().and_then(|c| c.token()).map(str::to_string),
        }
    }
}

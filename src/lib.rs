//! fba-tools umbrella crate.
//!
//! Re-exports the pieces most callers need to talk to an `fba_tools`
//! service: the typed [`FbaToolsClient`], its configuration, the
//! transport seam, and the parameter/result types of every remote method.
//!
//! ```no_run
//! use fba_tools::{FbaToolsClient, types::RunFluxBalanceAnalysisParams};
//!
//! # async fn demo() -> Result<(), fba_tools::RpcError> {
//! let client = FbaToolsClient::new("https://example.org/services/fba_tools")?
//!     .with_token("my-token");
//!
//! let params = RunFluxBalanceAnalysisParams {
//!     fbamodel_id: Some("MyModel".to_string()),
//!     workspace: Some("my_workspace".to_string()),
//!     ..Default::default()
//! };
//! let results = client.run_flux_balance_analysis(&params).await?;
//! println!("new FBA object: {:?}", results.new_fba_ref);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub use client::{FbaToolsClient, PendingCall, RpcInvoker};
pub use config::{AsyncJobConfig, Config, ConfigError, PollSchedule};
pub use fba_tools_http::HttpTransport;
pub use transport::{
    Credentials, DynTransport, Returns, RpcContext, RpcError, RpcRequest, TokenSource,
    TokenSupplier, Transport,
};
/// Parameter and result types for every remote method, plus the method catalogue.
pub use types;

/// Miscellaneous metadata about the fba-tools workspace.
pub mod fba_tools_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

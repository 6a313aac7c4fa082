#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `fba-tools-client`
//!
//! Asynchronous client for the `fba_tools` JSON-RPC 1.1 service.
//!
//! - [`RpcInvoker`] is the generic request function: it builds the
//!   envelope, hands it to a [`transport::Transport`] on a fresh tokio task
//!   and returns a [`PendingCall`].
//! - [`PendingCall`] settles exactly once, with the value or an
//!   [`RpcError`](transport::RpcError), and optionally runs success/failure
//!   callbacks.
//! - [`FbaToolsClient`] exposes one typed method per remote method, plus
//!   [`FbaToolsClient::call_by_name`] for untyped, name-based calls.

mod fba_client;
mod invoker;
mod pending;

pub use fba_client::FbaToolsClient;
pub use invoker::RpcInvoker;
pub use pending::PendingCall;

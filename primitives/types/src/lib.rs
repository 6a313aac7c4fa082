#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Core Type System for the `fba_tools` client
//!
//! This crate defines the method catalogue of the `fba_tools` service and
//! the parameter and result objects exchanged with it. The objects mirror
//! the service's type definitions: snake_case field names, every field
//! optional and omitted from the wire when unset, boolean flags carried as
//! `0`/`1` integers, and unrecognised fields kept in
//! `additional_properties` so that responses from newer servers still
//! decode.

/// Declares a service object: every field optional, `None` fields skipped on
/// serialization, unknown fields collected into `additional_properties`.
macro_rules! kbase_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
            /// Fields not modelled by this client version.
            #[serde(flatten)]
            pub additional_properties: serde_json::Map<String, serde_json::Value>,
        }
    };
}

/// Method catalogue: names, parameter shapes and categories.
pub mod method;

/// Shared objects: file handles, workspace references, exports, status.
#[allow(missing_docs)]
pub mod common;
/// File-to-object and object-to-file conversion parameters.
#[allow(missing_docs)]
pub mod conversion;
/// Model and media editing parameters and results.
#[allow(missing_docs)]
pub mod editing;
/// Reconstruction, gapfilling and flux analysis parameters and results.
#[allow(missing_docs)]
pub mod model;

pub use common::*;
pub use conversion::*;
pub use editing::*;
pub use method::{Method, MethodCategory, ParamShape, SERVICE_NAME};
pub use model::*;

/// Converts a Rust `bool` into the service's integer flag encoding.
pub fn flag(value: bool) -> i64 { i64::from(value) }

/// Reads an integer flag; absent or `0` is false.
pub fn is_set(flag: Option<i64>) -> bool { flag.is_some_and(|v| v != 0) }

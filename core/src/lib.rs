//! HTTP client adapter over an external web-request capability.
//!
//! # Overview
//! Translates a generic HTTP request into the parameter set of a
//! higher-level web-request command, invokes that command synchronously, and
//! translates its output back into a generic HTTP response. The capability
//! owns the network: connections, certificates, proxies and redirects.
//!
//! # Design
//! - `WebRequestClient` holds the capability and the `InvocationOptions`;
//!   parameters are rebuilt for every request.
//! - The request side (`translate`) maps methods, collapses multi-valued
//!   headers into the capability's single/array convention and buffers the
//!   body. Reading the body is the only await point and the only place a send
//!   can be cancelled.
//! - The response side (`response`) passes a ready-made base response
//!   through, or rebuilds one from the raw status, headers and content.
//! - `WebRequestCapability` is the seam to the outside; tests drive the
//!   client with scripted capabilities.

pub mod client;
pub mod error;
pub mod http;
pub mod invoke;
pub mod options;
pub mod params;
pub mod response;
pub mod translate;
pub mod types;

pub use crate::client::WebRequestClient;
pub use crate::error::{BoxError, Error, Result};
pub use crate::http::{
    RequestBody, RequestDescriptor, ResponseBody, ResponseDescriptor, WebResponseObject,
};
pub use crate::invoke::{InvokeResult, WebRequestCapability};
pub use crate::options::InvocationOptions;
pub use crate::params::{HeaderField, HeaderTable, InvocationParameters};
pub use crate::types::{ClientCertificate, Credential, MethodSupport, WebRequestMethod};

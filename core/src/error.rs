//! Error types for the web-request adapter.
//!
//! # Design
//! Every failure surfaces to the caller of `WebRequestClient::send`. Errors
//! coming from the body reader or from the capability are carried as sources
//! without being reworded, so callers can downcast to the original type.

/// Boxed error raised by a `WebRequestCapability`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the adapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The method is not in the capability's enumerated set and the active
    /// capability cannot express custom methods.
    #[error("unsupported non-standard HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The outgoing body could not be read in full.
    #[error("failed to read request body")]
    BodyRead(#[source] std::io::Error),

    /// The request was cancelled while its body was being read.
    #[error("request cancelled before invocation")]
    Cancelled,

    /// The capability itself failed (DNS, TLS, timeout, HTTP-level failure).
    #[error("web request invocation failed")]
    Invocation(#[source] BoxError),

    /// The capability produced zero or several response objects for one
    /// request.
    #[error("expected exactly one response object, capability produced {outputs}")]
    InvariantViolation { outputs: usize },

    /// The capability's response cannot be represented as an HTTP response.
    #[error("invalid response from capability: {0}")]
    InvalidResponse(String),
}

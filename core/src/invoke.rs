//! The seam to the external web-request capability.

use crate::error::{BoxError, Error, Result};
use crate::http::WebResponseObject;
use crate::params::InvocationParameters;

/// Everything a capability emitted for one call, or its failure.
pub type InvokeResult = std::result::Result<Vec<WebResponseObject>, BoxError>;

/// An external facility that performs one HTTP exchange from a parameter
/// set. Connection handling, certificates, proxies and redirects are its own
/// business.
///
/// `invoke` returns every object the capability emitted. A well-behaved
/// capability emits exactly one per call.
pub trait WebRequestCapability {
    fn invoke(&self, params: &InvocationParameters) -> InvokeResult;
}

impl<C: WebRequestCapability + ?Sized> WebRequestCapability for &C {
    fn invoke(&self, params: &InvocationParameters) -> InvokeResult {
        (**self).invoke(params)
    }
}

impl<C: WebRequestCapability + ?Sized> WebRequestCapability for Box<C> {
    fn invoke(&self, params: &InvocationParameters) -> InvokeResult {
        (**self).invoke(params)
    }
}

/// Run the capability once and return its single output.
///
/// Blocks for the duration of the exchange. Capability errors are passed
/// through untouched.
pub fn invoke_single<C>(capability: &C, params: &InvocationParameters) -> Result<WebResponseObject>
where
    C: WebRequestCapability + ?Sized,
{
    let mut outputs = capability.invoke(params).map_err(Error::Invocation)?;
    if outputs.len() != 1 {
        return Err(Error::InvariantViolation {
            outputs: outputs.len(),
        });
    }
    tracing::debug!(status = outputs[0].status_code, "capability returned");
    Ok(outputs.remove(0))
}

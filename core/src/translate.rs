//! Request side: `RequestDescriptor` + `InvocationOptions` to
//! `InvocationParameters`.
//!
//! # Design
//! Everything here is synchronous except draining the request body, which is
//! the one place a send can be cancelled.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::http::RequestDescriptor;
use crate::options::InvocationOptions;
use crate::params::{HeaderField, HeaderTable, InvocationParameters};
use crate::types::{MethodSupport, WebRequestMethod};

/// Build the parameters for one invocation.
///
/// `request` is only mutated to buffer a streaming body, so translating the
/// same request again yields equal parameters.
pub async fn translate_request(
    request: &mut RequestDescriptor,
    options: &InvocationOptions,
    support: MethodSupport,
    cancel: &CancellationToken,
) -> Result<InvocationParameters> {
    let mut params = InvocationParameters::new(request.uri.to_string());
    apply_options(&mut params, options);
    apply_method(&mut params, &request.method, support)?;
    flatten_headers(&request.headers, &mut params.headers);

    if let Some(body) = request.body.as_mut() {
        let bytes = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            read = body.read_to_bytes() => read.map_err(Error::BodyRead)?,
        };
        tracing::trace!(len = bytes.len(), "request body buffered");

        params.content_type = body.headers().get(CONTENT_TYPE).map(header_string);
        params.body = Some(bytes);
        flatten_headers(body.headers(), &mut params.headers);
    }

    Ok(params)
}

/// Copy options onto `params`. Unset options stay unset.
pub fn apply_options(params: &mut InvocationParameters, options: &InvocationOptions) {
    params.certificate = options.certificate.clone();
    params.certificate_thumbprint = options.certificate_thumbprint.clone();
    params.credential = options.credential.clone();
    params.proxy = options.proxy.as_ref().map(ToString::to_string);
    params.proxy_credential = options.proxy_credential.clone();
    params.transfer_encoding = options.transfer_encoding.clone();
    params.user_agent = options.user_agent.clone();

    if let Some(disable) = options.disable_keep_alive {
        params.disable_keep_alive = Some(disable);
    }
    if let Some(max) = options.maximum_redirection {
        params.maximum_redirection = Some(max);
    }
    if let Some(enabled) = options.proxy_use_default_credentials {
        params.proxy_use_default_credentials = Some(enabled);
    }
    if let Some(seconds) = options.timeout_sec {
        params.timeout_sec = Some(seconds);
    }
    if let Some(enabled) = options.use_basic_parsing {
        params.use_basic_parsing = Some(enabled);
    }
    if let Some(enabled) = options.use_default_credentials {
        params.use_default_credentials = Some(enabled);
    }
}

/// Select the enumerated method, or fall back to a custom method when the
/// capability accepts one.
pub fn apply_method(
    params: &mut InvocationParameters,
    method: &Method,
    support: MethodSupport,
) -> Result<()> {
    match method.as_str().parse::<WebRequestMethod>() {
        Ok(known) => params.method = Some(known),
        Err(_) => match support {
            MethodSupport::CustomMethodSupported => {
                params.custom_method = Some(method.as_str().to_string());
            }
            MethodSupport::CustomMethodUnsupported => {
                return Err(Error::UnsupportedMethod(method.as_str().to_string()));
            }
        },
    }
    Ok(())
}

/// Merge `headers` into `table`, one entry per header name.
pub fn flatten_headers(headers: &HeaderMap, table: &mut HeaderTable) {
    for name in headers.keys() {
        let values = headers.get_all(name).iter().map(header_string);
        table.insert(name.as_str(), HeaderField::from_values(values));
    }
}

fn header_string(value: &http::HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

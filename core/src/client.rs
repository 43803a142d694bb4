//! HTTP client that hands transmission to a web-request capability.
//!
//! # Design
//! `WebRequestClient` owns the capability and the `InvocationOptions`, and
//! keeps no other state between calls. `send` is split into
//! `build_parameters` (request side, async only while the body is read) and
//! `parse_response` (response side), with a blocking capability call in
//! between. Options are changed through `&mut self`, so they cannot change
//! while a `send` borrowing the same client is in flight.

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::error::Result;
use crate::http::{RequestDescriptor, ResponseDescriptor, WebResponseObject};
use crate::invoke::{invoke_single, WebRequestCapability};
use crate::options::InvocationOptions;
use crate::params::InvocationParameters;
use crate::response::translate_response;
use crate::translate::translate_request;
use crate::types::MethodSupport;

/// Sends `RequestDescriptor`s through a `WebRequestCapability`.
#[derive(Debug, Clone)]
pub struct WebRequestClient<C> {
    capability: C,
    options: InvocationOptions,
    method_support: MethodSupport,
}

impl<C: WebRequestCapability> WebRequestClient<C> {
    /// Client with no options set, for a capability that accepts custom
    /// methods.
    pub fn new(capability: C) -> Self {
        Self {
            capability,
            options: InvocationOptions::default(),
            method_support: MethodSupport::default(),
        }
    }

    pub fn with_options(mut self, options: InvocationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_method_support(mut self, support: MethodSupport) -> Self {
        self.method_support = support;
        self
    }

    pub fn options(&self) -> &InvocationOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut InvocationOptions {
        &mut self.options
    }

    pub fn method_support(&self) -> MethodSupport {
        self.method_support
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Send `request` and return the capability's response.
    ///
    /// `cancel` is only observed while the request body is being read. Once
    /// the capability has been invoked the call runs to completion; use the
    /// `TimeoutSec` option to bound it.
    pub async fn send(
        &self,
        mut request: RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<ResponseDescriptor> {
        let span =
            tracing::debug_span!("web_request", method = %request.method, uri = %request.uri);
        async move {
            let params = self.build_parameters(&mut request, cancel).await?;
            tracing::debug!(
                headers = params.headers.len(),
                body = params.body.as_ref().map_or(0, |b| b.len()),
                "invoking capability"
            );
            let web_response = invoke_single(&self.capability, &params)?;
            self.parse_response(web_response, request)
        }
        .instrument(span)
        .await
    }

    /// Translate `request` into the parameters for one invocation.
    pub async fn build_parameters(
        &self,
        request: &mut RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<InvocationParameters> {
        translate_request(request, &self.options, self.method_support, cancel).await
    }

    /// Turn the capability's output for `request` into the caller's response.
    pub fn parse_response(
        &self,
        web_response: WebResponseObject,
        request: RequestDescriptor,
    ) -> Result<ResponseDescriptor> {
        translate_response(web_response, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::{RequestBody, ResponseBody};
    use crate::invoke::InvokeResult;
    use crate::params::HeaderField;
    use crate::types::WebRequestMethod;
    use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
    use http::{Method, StatusCode, Uri};
    use std::cell::RefCell;

    /// Records every parameter set and answers with a fixed text response.
    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<InvocationParameters>>,
    }

    impl WebRequestCapability for Recorder {
        fn invoke(&self, params: &InvocationParameters) -> InvokeResult {
            self.seen.borrow_mut().push(params.clone());
            Ok(vec![WebResponseObject::new(200, "OK")
                .header("Content-Type", "text/plain")
                .content(ResponseBody::from_bytes("hello"))])
        }
    }

    fn client() -> WebRequestClient<Recorder> {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
        WebRequestClient::new(Recorder::default())
    }

    #[tokio::test]
    async fn get_round_trip() {
        let client = client();
        let request = RequestDescriptor::new(Method::GET, Uri::from_static("https://example.test/"));
        let response = client.send(request, &CancellationToken::new()).await.unwrap();

        let seen = client.capability().seen.borrow();
        assert_eq!(seen.len(), 1);
        let mut expected = InvocationParameters::new("https://example.test/");
        expected.method = Some(WebRequestMethod::Get);
        assert_eq!(seen[0], expected);

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers[CONTENT_TYPE], "text/plain");
        assert_eq!(response.body.into_string().unwrap(), "hello");
    }

    #[tokio::test]
    async fn post_with_body_and_repeated_header() {
        let client = client();
        let trace = HeaderName::from_static("x-trace");
        let request = RequestDescriptor::new(Method::POST, Uri::from_static("https://example.test/items"))
            .header(trace.clone(), HeaderValue::from_static("1"))
            .header(trace, HeaderValue::from_static("2"))
            .body(
                RequestBody::from_bytes(r#"{"a":1}"#)
                    .content_type(HeaderValue::from_static("application/json")),
            );
        client.send(request, &CancellationToken::new()).await.unwrap();

        let seen = client.capability().seen.borrow();
        let params = &seen[0];
        assert_eq!(params.method, Some(WebRequestMethod::Post));
        assert_eq!(params.headers.get("X-Trace"), Some(&HeaderField::from(vec!["1", "2"])));
        assert_eq!(params.body.as_deref(), Some(&br#"{"a":1}"#[..]));
        assert_eq!(params.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn options_reach_the_capability() {
        let mut client = client().with_options(InvocationOptions::new().timeout_sec(30));
        client.options_mut().use_basic_parsing = Some(true);
        assert_eq!(client.options().timeout_sec, Some(30));

        let request = RequestDescriptor::new(Method::GET, Uri::from_static("https://example.test/"));
        client.send(request, &CancellationToken::new()).await.unwrap();

        let seen = client.capability().seen.borrow();
        assert_eq!(seen[0].timeout_sec, Some(30));
        assert_eq!(seen[0].use_basic_parsing, Some(true));
        assert!(seen[0].disable_keep_alive.is_none());
    }

    #[tokio::test]
    async fn unsupported_custom_method_never_invokes() {
        let client = client().with_method_support(MethodSupport::CustomMethodUnsupported);
        assert_eq!(client.method_support(), MethodSupport::CustomMethodUnsupported);
        let method = Method::from_bytes(b"LOCK").unwrap();
        let request = RequestDescriptor::new(method, Uri::from_static("https://example.test/"));
        let err = client.send(request, &CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedMethod(ref m) if m == "LOCK"));
        assert!(client.capability().seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn cancelled_before_body_read_never_invokes() {
        let client = client();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let request = RequestDescriptor::new(Method::PUT, Uri::from_static("https://example.test/"))
            .body(RequestBody::from_bytes("data"));
        let err = client.send(request, &cancel).await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert!(client.capability().seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn cancellation_is_ignored_without_body() {
        let client = client();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let request = RequestDescriptor::new(Method::GET, Uri::from_static("https://example.test/"));
        let response = client.send(request, &cancel).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn response_keeps_originating_request() {
        let client = client();
        let request = RequestDescriptor::new(Method::DELETE, Uri::from_static("https://example.test/x"));
        let response = client.send(request, &CancellationToken::new()).await.unwrap();
        let origin = response.request.unwrap();
        assert_eq!(origin.method, Method::DELETE);
        assert_eq!(origin.uri, "https://example.test/x");
    }
}

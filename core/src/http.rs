//! HTTP transport types on both sides of the adapter.
//!
//! # Design
//! `RequestDescriptor` and `ResponseDescriptor` are the generic request and
//! response shapes seen by the calling HTTP abstraction. `WebResponseObject`
//! is what the web-request capability hands back after an invocation. The
//! adapter never touches the network: it only converts between these shapes
//! and `InvocationParameters`.
//!
//! Header collections use `http::HeaderMap`, which already gives
//! case-insensitive keys and ordered multi-value entries.

use std::fmt;
use std::io::{self, Cursor, Read};
use std::pin::Pin;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode, Uri};
use tokio::io::{AsyncRead, AsyncReadExt};

/// An outgoing HTTP request as submitted by the caller.
#[derive(Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a header value, keeping any values already present for `name`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Request payload together with its content headers
/// (`Content-Type`, `Content-Length`, `Content-Encoding`, ...).
pub struct RequestBody {
    headers: HeaderMap,
    source: BodySource,
}

enum BodySource {
    Buffered(Bytes),
    Reader(Pin<Box<dyn AsyncRead + Send>>),
}

impl RequestBody {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            headers: HeaderMap::new(),
            source: BodySource::Buffered(bytes.into()),
        }
    }

    /// Body produced by an asynchronous reader. The reader is drained the
    /// first time the body is read and the bytes are kept for later reads.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            headers: HeaderMap::new(),
            source: BodySource::Reader(Box::pin(reader)),
        }
    }

    pub fn content_type(self, value: HeaderValue) -> Self {
        self.header(CONTENT_TYPE, value)
    }

    /// Append a content header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Read the whole payload into memory.
    pub async fn read_to_bytes(&mut self) -> io::Result<Bytes> {
        let bytes = match &mut self.source {
            BodySource::Buffered(bytes) => return Ok(bytes.clone()),
            BodySource::Reader(reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                Bytes::from(buf)
            }
        };
        self.source = BodySource::Buffered(bytes.clone());
        Ok(bytes)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            BodySource::Buffered(bytes) => format!("{} buffered bytes", bytes.len()),
            BodySource::Reader(_) => "reader".to_string(),
        };
        f.debug_struct("RequestBody")
            .field("headers", &self.headers)
            .field("source", &source)
            .finish()
    }
}

/// Response body stream. Ownership passes to the caller of `send`.
pub struct ResponseBody(Box<dyn Read + Send>);

impl ResponseBody {
    pub fn new<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self(Box::new(reader))
    }

    pub fn empty() -> Self {
        Self::new(io::empty())
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.0.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn into_string(mut self) -> io::Result<String> {
        let mut buf = String::new();
        self.0.read_to_string(&mut buf)?;
        Ok(buf)
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseBody { .. }")
    }
}

/// The generic HTTP response handed back to the caller.
///
/// `request` is the originating request; it is `None` only for a base
/// response that has not yet been through `parse_response`.
#[derive(Debug)]
pub struct ResponseDescriptor {
    pub status: StatusCode,
    pub reason: Option<String>,
    pub headers: HeaderMap,
    pub body: ResponseBody,
    pub request: Option<RequestDescriptor>,
}

impl ResponseDescriptor {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            headers: HeaderMap::new(),
            body: ResponseBody::empty(),
            request: None,
        }
    }
}

/// One output object of a web-request invocation.
///
/// `base_response` is set by capabilities that can build the generic
/// response themselves; otherwise the adapter rebuilds it from the raw
/// fields.
#[derive(Debug)]
pub struct WebResponseObject {
    pub status_code: u16,
    pub status_description: String,
    /// Header name to its values, in the order the capability reported them.
    pub headers: Vec<(String, Vec<String>)>,
    pub raw_content: ResponseBody,
    pub base_response: Option<ResponseDescriptor>,
}

impl WebResponseObject {
    pub fn new(status_code: u16, status_description: impl Into<String>) -> Self {
        Self {
            status_code,
            status_description: status_description.into(),
            headers: Vec::new(),
            raw_content: ResponseBody::empty(),
            base_response: None,
        }
    }

    /// Add a value for `name`, grouping it with earlier values of the same
    /// (case-insensitive) name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some((_, values)) => values.push(value),
            None => self.headers.push((name, vec![value])),
        }
        self
    }

    pub fn content(mut self, body: ResponseBody) -> Self {
        self.raw_content = body;
        self
    }

    pub fn base_response(mut self, response: ResponseDescriptor) -> Self {
        self.base_response = Some(response);
        self
    }
}

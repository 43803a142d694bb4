//! Response side: `WebResponseObject` to `ResponseDescriptor`.
//!
//! A capability that already built a `ResponseDescriptor` has it passed
//! through untouched apart from the request back-reference. Otherwise the
//! response is rebuilt from the raw status, description, headers and content.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, ResponseDescriptor, WebResponseObject};

pub fn translate_response(
    web_response: WebResponseObject,
    request: RequestDescriptor,
) -> Result<ResponseDescriptor> {
    if let Some(mut response) = web_response.base_response {
        tracing::trace!("using base response");
        response.request = Some(request);
        return Ok(response);
    }

    tracing::trace!("rebuilding response from raw fields");
    let status = StatusCode::from_u16(web_response.status_code).map_err(|_| {
        Error::InvalidResponse(format!("status code {}", web_response.status_code))
    })?;
    Ok(ResponseDescriptor {
        status,
        reason: Some(web_response.status_description),
        headers: copy_headers(&web_response.headers)?,
        body: web_response.raw_content,
        request: Some(request),
    })
}

/// One entry per name; every value is appended so multi-valued headers stay
/// separate values.
fn copy_headers(raw: &[(String, Vec<String>)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, values) in raw {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidResponse(format!("header name {name:?}")))?;
        for value in values {
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidResponse(format!("value for header {name}")))?;
            headers.append(name.clone(), value);
        }
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseBody;
    use http::header::{CONTENT_TYPE, SET_COOKIE};
    use http::Method;

    fn request() -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, http::Uri::from_static("https://example.test/"))
    }

    fn raw_hello() -> WebResponseObject {
        WebResponseObject::new(200, "OK")
            .header("Content-Type", "text/plain")
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2")
            .content(ResponseBody::from_bytes("hello"))
    }

    fn base_hello() -> WebResponseObject {
        let mut base = ResponseDescriptor::new(StatusCode::OK);
        base.reason = Some("OK".to_string());
        base.headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        base.headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        base.headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        base.body = ResponseBody::from_bytes("hello");
        // Raw fields deliberately disagree: the base response must win.
        WebResponseObject::new(500, "ignored").base_response(base)
    }

    #[test]
    fn raw_fields_are_rebuilt() {
        let response = translate_response(raw_hello(), request()).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.reason.as_deref(), Some("OK"));
        assert_eq!(response.headers[CONTENT_TYPE], "text/plain");
        let cookies: Vec<_> = response.headers.get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert_eq!(response.request.as_ref().unwrap().uri, "https://example.test/");
        assert_eq!(response.body.into_string().unwrap(), "hello");
    }

    #[test]
    fn base_response_passes_through_with_request() {
        let response = translate_response(base_hello(), request()).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.request.as_ref().unwrap().method, Method::GET);
        assert_eq!(response.body.into_string().unwrap(), "hello");
    }

    #[test]
    fn both_paths_look_the_same() {
        let raw = translate_response(raw_hello(), request()).unwrap();
        let base = translate_response(base_hello(), request()).unwrap();
        assert_eq!(raw.status, base.status);
        assert_eq!(raw.reason, base.reason);
        assert_eq!(raw.headers, base.headers);
        assert_eq!(
            raw.body.into_bytes().unwrap(),
            base.body.into_bytes().unwrap()
        );
    }

    #[test]
    fn custom_reason_phrase_is_kept() {
        let raw = WebResponseObject::new(299, "Mostly Fine");
        let response = translate_response(raw, request()).unwrap();
        assert_eq!(response.status.as_u16(), 299);
        assert_eq!(response.reason.as_deref(), Some("Mostly Fine"));
    }

    #[test]
    fn out_of_range_status_is_rejected() {
        let err = translate_response(WebResponseObject::new(42, "?"), request()).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let raw = WebResponseObject::new(200, "OK").header("bad header", "x");
        let err = translate_response(raw, request()).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }
}

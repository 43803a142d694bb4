//! Value types shared by the options and the invocation parameters.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The capability's enumerated method set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebRequestMethod {
    Default,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Options,
    Merge,
    Patch,
}

impl WebRequestMethod {
    pub const ALL: [WebRequestMethod; 10] = [
        WebRequestMethod::Default,
        WebRequestMethod::Get,
        WebRequestMethod::Head,
        WebRequestMethod::Post,
        WebRequestMethod::Put,
        WebRequestMethod::Delete,
        WebRequestMethod::Trace,
        WebRequestMethod::Options,
        WebRequestMethod::Merge,
        WebRequestMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebRequestMethod::Default => "Default",
            WebRequestMethod::Get => "Get",
            WebRequestMethod::Head => "Head",
            WebRequestMethod::Post => "Post",
            WebRequestMethod::Put => "Put",
            WebRequestMethod::Delete => "Delete",
            WebRequestMethod::Trace => "Trace",
            WebRequestMethod::Options => "Options",
            WebRequestMethod::Merge => "Merge",
            WebRequestMethod::Patch => "Patch",
        }
    }
}

/// Returned when a method token is not in the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for WebRequestMethod {
    type Err = UnknownMethod;

    /// Case-insensitive match against the enumerated names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for WebRequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the active capability accepts methods outside
/// `WebRequestMethod`. Chosen when the client is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodSupport {
    #[default]
    CustomMethodSupported,
    CustomMethodUnsupported,
}

/// User name and password handed to the capability.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credential {
    pub user_name: String,
    pub password: String,
}

impl Credential {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// DER-encoded client certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCertificate(pub Bytes);

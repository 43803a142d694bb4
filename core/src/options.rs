//! Per-client configuration forwarded to every invocation.
//!
//! # Design
//! Every option is an `Option`. `None` means "let the capability use its own
//! default", which is not the same as an explicit `false` or `0`, so unset
//! options are never forwarded and never serialized.

use http::Uri;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{ClientCertificate, Credential};

/// Options applied to each web-request invocation.
///
/// Deserializes from the capability's PascalCase parameter names, so a host
/// can load it from JSON; missing keys stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InvocationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<ClientCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_thumbprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_redirection: Option<u32>,
    #[serde(with = "opt_uri", skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_credential: Option<Credential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_use_default_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_basic_parsing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_default_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl InvocationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn certificate(mut self, certificate: ClientCertificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    pub fn certificate_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.certificate_thumbprint = Some(thumbprint.into());
        self
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn disable_keep_alive(mut self, disable: bool) -> Self {
        self.disable_keep_alive = Some(disable);
        self
    }

    pub fn maximum_redirection(mut self, max: u32) -> Self {
        self.maximum_redirection = Some(max);
        self
    }

    pub fn proxy(mut self, proxy: Uri) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn proxy_credential(mut self, credential: Credential) -> Self {
        self.proxy_credential = Some(credential);
        self
    }

    pub fn proxy_use_default_credentials(mut self, enabled: bool) -> Self {
        self.proxy_use_default_credentials = Some(enabled);
        self
    }

    pub fn timeout_sec(mut self, seconds: u32) -> Self {
        self.timeout_sec = Some(seconds);
        self
    }

    pub fn transfer_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.transfer_encoding = Some(encoding.into());
        self
    }

    pub fn use_basic_parsing(mut self, enabled: bool) -> Self {
        self.use_basic_parsing = Some(enabled);
        self
    }

    pub fn use_default_credentials(mut self, enabled: bool) -> Self {
        self.use_default_credentials = Some(enabled);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// `Option<Uri>` as an optional string.
mod opt_uri {
    use super::*;

    pub fn serialize<S: Serializer>(uri: &Option<Uri>, serializer: S) -> Result<S::Ok, S::Error> {
        match uri {
            Some(uri) => serializer.serialize_some(&uri.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Uri>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| s.parse::<Uri>().map_err(serde::de::Error::custom))
            .transpose()
    }
}

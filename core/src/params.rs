//! The capability's parameter set for a single invocation.
//!
//! # Design
//! `InvocationParameters` is rebuilt from scratch for every request. Fields
//! that were not set stay `None` and are left out when the parameters are
//! serialized for a host, so the capability applies its own defaults.
//!
//! Headers follow the capability's convention: one value is passed as a
//! plain string, several values as an array of strings.

use bytes::Bytes;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{ClientCertificate, Credential, WebRequestMethod};

/// A header value in the capability's single/array convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderField {
    /// One value becomes `Single`, several become `Multiple`. An empty list
    /// yields an empty `Single` string.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut values: Vec<String> = values.into_iter().collect();
        match values.len() {
            0 => HeaderField::Single(String::new()),
            1 => HeaderField::Single(values.remove(0)),
            _ => HeaderField::Multiple(values),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderField::Single(value) => vec![value.as_str()],
            HeaderField::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for HeaderField {
    fn from(value: &str) -> Self {
        HeaderField::Single(value.to_string())
    }
}

impl From<Vec<&str>> for HeaderField {
    fn from(values: Vec<&str>) -> Self {
        HeaderField::from_values(values.into_iter().map(str::to_string))
    }
}

/// Header map with case-insensitive keys and one entry per key, in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<(String, HeaderField)>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `field`. An existing entry with the same
    /// case-insensitive name is overwritten in place and keeps its spelling.
    pub fn insert(&mut self, name: impl Into<String>, field: HeaderField) {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = field,
            None => self.entries.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderField> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderField)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }
}

impl Serialize for HeaderTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field) in &self.entries {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

/// Everything the capability needs to perform one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationParameters {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<WebRequestMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_method: Option<String>,
    pub headers: HeaderTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
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

impl InvocationParameters {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Serialize for a host that consumes the parameters as JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

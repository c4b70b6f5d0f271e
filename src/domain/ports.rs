use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::Result;

/// Opaque API credential. Sent as the HTTP Basic username, paired with an
/// empty password. Immutable for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

// Credentials must never end up in logs or error chains.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// One outbound request. A body present implies `POST`, absent implies `GET`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: Url,
    pub body: Option<Value>,
}

/// What a transport hands back, already split into header block and body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status line and headers as they arrived, ending with a blank line.
    pub header_block: String,
    /// Raw body text, possibly empty.
    pub body: String,
    /// Final URL after any redirects.
    pub effective_url: String,
}

impl RawResponse {
    /// A minimal JSON response as a transport would report it.
    pub fn json(status: u16, body: impl Into<String>, effective_url: impl Into<String>) -> Self {
        Self {
            status,
            header_block: format!("HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\r\n"),
            body: body.into(),
            effective_url: effective_url.into(),
        }
    }
}

/// The seam between the client and the wire. Implementations perform one
/// authenticated HTTP exchange per call and hold no request state between
/// calls.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, key: &ApiKey, req: &RequestSpec) -> Result<RawResponse>;
}

pub type TransportBox = Box<dyn Transport>;

use serde_json::Value;

use crate::domain::ports::RawResponse;
use crate::error::{GatewayError, Result};

/// The recorded outcome of one completed HTTP exchange: raw headers, raw
/// body, status code and the final URL after redirects. Any status code is
/// recorded as-is; deciding what counts as failure is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    /// Status line and headers as they arrived on the wire.
    pub header: String,
    /// Raw body text, possibly empty.
    pub body: String,
    /// HTTP status code.
    pub status: u16,
    /// Final URL after any redirects were followed.
    pub effective_url: String,
}

impl ResponseRecord {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Promotes a non-2xx status to [`GatewayError::Http`] for callers who
    /// want status codes to fail loudly.
    pub fn error_for_status(&self) -> Result<&Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GatewayError::Http {
                status: self.status,
            })
        }
    }
}

impl From<RawResponse> for ResponseRecord {
    fn from(raw: RawResponse) -> Self {
        Self {
            header: raw.header_block,
            body: raw.body,
            status: raw.status,
            effective_url: raw.effective_url,
        }
    }
}

/// A response record paired with the JSON decoded from its body, stored and
/// replaced as one unit so the two are never observed half-updated.
#[derive(Debug, Clone)]
pub(crate) struct LastExchange {
    pub record: ResponseRecord,
    pub decoded: Option<Value>,
}

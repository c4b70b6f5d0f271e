use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{StatusCode, Version};

use crate::domain::ports::{ApiKey, RawResponse, RequestSpec, Transport};
use crate::error::{GatewayError, Result};

/// How long one gateway round trip may take.
const API_TIMEOUT: Duration = Duration::from_secs(60);

/// Ownership of the underlying connection handle.
#[derive(Default)]
pub enum ConnectionLifecycle {
    /// A fresh handle is opened for each request and dropped when the
    /// request completes.
    #[default]
    Automatic,
    /// The caller owns the handle; it is reused across requests and never
    /// torn down here.
    ExternallyManaged(reqwest::Client),
}

/// Transport adapter speaking HTTPS via reqwest. Applies Basic
/// authentication with the API key as username and an empty password, the
/// JSON content type, and the fixed request timeout; follows redirects and
/// reports the final URL.
#[derive(Default)]
pub struct HttpTransport {
    lifecycle: ConnectionLifecycle,
}

impl HttpTransport {
    /// An adapter that manages the connection handle per call.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifecycle(lifecycle: ConnectionLifecycle) -> Self {
        Self { lifecycle }
    }

    fn handle(&self) -> Result<reqwest::Client> {
        match &self.lifecycle {
            ConnectionLifecycle::Automatic => reqwest::Client::builder()
                .build()
                .map_err(|e| GatewayError::Transport(e.to_string())),
            // reqwest clients are handles onto a shared pool, so this clone
            // reuses the caller's connections.
            ConnectionLifecycle::ExternallyManaged(client) => Ok(client.clone()),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, key: &ApiKey, req: &RequestSpec) -> Result<RawResponse> {
        let client = self.handle()?;
        // `json` sets the content type on the POST path; the GET path sets
        // it explicitly so every request goes out as application/json.
        let builder = match &req.body {
            Some(body) => client.post(req.url.clone()).json(body),
            None => client
                .get(req.url.clone())
                .header(CONTENT_TYPE, "application/json"),
        };

        let response = builder
            .basic_auth(key.as_str(), Some(""))
            .timeout(API_TIMEOUT)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let effective_url = response.url().to_string();
        let header_block = render_header_block(response.version(), status, response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            header_block,
            body,
            effective_url,
        })
    }
}

/// Renders the status line and headers back into the wire form, terminated
/// by the blank line separating them from the body.
fn render_header_block(version: Version, status: StatusCode, headers: &HeaderMap) -> String {
    let mut block = format!("{version:?} {status}\r\n");
    for (name, value) in headers {
        let _ = write!(
            block,
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
    block.push_str("\r\n");
    block
}

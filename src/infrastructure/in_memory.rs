use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{ApiKey, RawResponse, RequestSpec, Transport};
use crate::error::{GatewayError, Result};

/// A scripted transport for exercising the client without a socket.
///
/// Canned outcomes are served in FIFO order, and every request is captured
/// together with the credential it was sent with. Clones share the same
/// script and capture log, so a test can keep a handle for assertions after
/// handing one to the client.
#[derive(Default, Clone)]
pub struct InMemoryTransport {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    script: VecDeque<Result<RawResponse>>,
    sent: Vec<SentRequest>,
}

/// One captured request: the credential and the request spec as the client
/// handed them to the transport.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub key: String,
    pub spec: RequestSpec,
}

impl InMemoryTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a canned response.
    pub async fn push_response(&self, raw: RawResponse) {
        self.state.lock().await.script.push_back(Ok(raw));
    }

    /// Queues a canned failure.
    pub async fn push_error(&self, err: GatewayError) {
        self.state.lock().await.script.push_back(Err(err));
    }

    /// The requests captured so far, in send order.
    pub async fn sent(&self) -> Vec<SentRequest> {
        self.state.lock().await.sent.clone()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, key: &ApiKey, req: &RequestSpec) -> Result<RawResponse> {
        let mut state = self.state.lock().await;
        state.sent.push(SentRequest {
            key: key.as_str().to_owned(),
            spec: req.clone(),
        });
        state.script.pop_front().unwrap_or_else(|| {
            Err(GatewayError::Transport(
                "no scripted response left".to_owned(),
            ))
        })
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every way a gateway call can fail. Nothing is swallowed: each operation
/// returns `Err` carrying the failure kind and the underlying message.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// DNS, connect, TLS or timeout failure reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),
    /// Non-2xx status, surfaced only where the caller opts in.
    #[error("Gateway returned HTTP {status}")]
    Http { status: u16 },
    /// The response body was present but not valid JSON.
    #[error("Response body is not valid JSON: {0}")]
    Decode(serde_json::Error),
    /// Malformed endpoint URL or unserializable body; raised before any I/O.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Valid JSON that lacks the field an operation extracts.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(&'static str),
}

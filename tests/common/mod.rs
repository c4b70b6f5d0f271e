use vindi::VindiClient;
use wiremock::MockServer;

/// `Authorization` value reqwest derives for the test key: Basic
/// credentials of `test-key` with an empty password.
pub const TEST_KEY_AUTH_HEADER: &str = "Basic dGVzdC1rZXk6";

pub async fn mock_gateway() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> VindiClient {
    VindiClient::new("test-key").with_base_url(server.uri())
}

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::ports::{ApiKey, RequestSpec, TransportBox};
use crate::domain::resources::{BillItem, CreatedCustomer, NewBill, NewCustomer, NewPaymentProfile};
use crate::domain::response::{LastExchange, ResponseRecord};
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::HttpTransport;

/// Production API root. The service exposes a fixed host; `with_base_url`
/// exists for the sandbox environment and for local test servers.
pub const DEFAULT_BASE_URL: &str = "https://www.vindi.com.br/recurrent/api/v1";

/// Client for the Vindi recurrent-billing API.
///
/// Holds the API credential, issues authenticated JSON requests to the fixed
/// endpoints, and caches the most recent exchange for inspection via
/// [`last_response`](Self::last_response) and [`last_body`](Self::last_body).
///
/// Operations take `&mut self`: exclusive access to the cached exchange is
/// enforced by the borrow checker, so one instance cannot be raced from two
/// tasks. Independent instances share no state.
pub struct VindiClient {
    api_key: ApiKey,
    base_url: String,
    transport: TransportBox,
    last: Option<LastExchange>,
}

impl VindiClient {
    /// Creates a client that opens a fresh connection handle per call.
    /// Performs no network I/O.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self::with_transport(api_key, Box::new(HttpTransport::new()))
    }

    /// Creates a client backed by the given transport.
    pub fn with_transport(api_key: impl Into<ApiKey>, transport: TransportBox) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            transport,
            last: None,
        }
    }

    /// Replaces the API root the endpoint templates are joined against.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Performs one gateway exchange: validates the endpoint, sends the
    /// request (`POST` when a body is given, `GET` otherwise), decodes the
    /// response body, and caches the result.
    ///
    /// Any HTTP status is a success at this layer; callers branch on
    /// [`ResponseRecord::status`] or opt in via
    /// [`ResponseRecord::error_for_status`]. On `Err` the cached exchange
    /// from the previous call is left untouched.
    pub async fn execute(&mut self, endpoint: &str, body: Option<Value>) -> Result<ResponseRecord> {
        let url = parse_endpoint(endpoint)?;
        let req = RequestSpec { url, body };

        debug!(url = %req.url, post = req.body.is_some(), "dispatching gateway request");
        let raw = self.transport.send(&self.api_key, &req).await?;
        debug!(status = raw.status, url = %raw.effective_url, "gateway responded");

        let decoded = if raw.body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&raw.body).map_err(GatewayError::Decode)?)
        };

        let record = ResponseRecord::from(raw);
        self.last = Some(LastExchange {
            record: record.clone(),
            decoded,
        });
        Ok(record)
    }

    /// The record of the most recent completed call, if any.
    pub fn last_response(&self) -> Option<&ResponseRecord> {
        self.last.as_ref().map(|exchange| &exchange.record)
    }

    /// The decoded JSON body of the most recent completed call. `None` if no
    /// call completed yet or the last response body was empty.
    pub fn last_body(&self) -> Option<&Value> {
        self.last.as_ref().and_then(|exchange| exchange.decoded.as_ref())
    }

    /// `GET /payment_methods`: the payment methods enabled for the account.
    pub async fn list_payment_methods(&mut self) -> Result<ResponseRecord> {
        let endpoint = self.endpoint("payment_methods");
        self.execute(&endpoint, None).await
    }

    /// `POST /customers`: registers a customer and returns the id the
    /// gateway assigned. Fails with [`GatewayError::Http`] on a non-2xx
    /// status and [`GatewayError::UnexpectedResponse`] when the response
    /// carries no `customer.id`.
    pub async fn create_customer(&mut self, name: &str, email: &str, code: &str) -> Result<u64> {
        let customer = NewCustomer {
            name: name.to_owned(),
            email: email.to_owned(),
            code: code.to_owned(),
        };
        let endpoint = self.endpoint("customers");
        let record = self.execute(&endpoint, Some(to_body(&customer)?)).await?;
        record.error_for_status()?;

        let decoded = self
            .last_body()
            .cloned()
            .ok_or(GatewayError::UnexpectedResponse(
                "customer creation returned an empty body",
            ))?;
        let created: CreatedCustomer = serde_json::from_value(decoded)
            .map_err(|_| GatewayError::UnexpectedResponse("response carries no customer.id"))?;
        Ok(created.customer.id)
    }

    /// `POST /payment_profiles`: associates a card with a customer.
    pub async fn create_payment_profile(
        &mut self,
        profile: NewPaymentProfile,
    ) -> Result<ResponseRecord> {
        let endpoint = self.endpoint("payment_profiles");
        self.execute(&endpoint, Some(to_body(&profile)?)).await
    }

    /// `POST /bills`: charges a customer for a single product line item.
    pub async fn create_bill(
        &mut self,
        customer_id: u64,
        payment_method_code: &str,
        amount: Decimal,
        product_id: u64,
    ) -> Result<ResponseRecord> {
        let bill = NewBill {
            customer_id,
            payment_method_code: payment_method_code.to_owned(),
            bill_items: vec![BillItem { product_id, amount }],
        };
        let endpoint = self.endpoint("bills");
        self.execute(&endpoint, Some(to_body(&bill)?)).await
    }

    /// `GET /bills/{id}`: all details of one bill.
    pub async fn get_bill(&mut self, id: u64) -> Result<ResponseRecord> {
        let endpoint = self.endpoint(&format!("bills/{id}"));
        self.execute(&endpoint, None).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn to_body<T: serde::Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| GatewayError::InvalidInput(e.to_string()))
}

/// Endpoints must be absolute http(s) URLs. Anything else fails here,
/// before any network I/O happens.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    if endpoint.is_empty() {
        return Err(GatewayError::InvalidInput(
            "endpoint URL is empty".to_owned(),
        ));
    }
    let url = Url::parse(endpoint)
        .map_err(|e| GatewayError::InvalidInput(format!("endpoint URL {endpoint:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GatewayError::InvalidInput(format!(
            "endpoint URL {endpoint:?} has unsupported scheme {other:?}"
        ))),
    }
}

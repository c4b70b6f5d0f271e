//! Client for the Vindi recurrent-billing HTTP API.
//!
//! Covers the basics of a payment integration: register customers,
//! associate credit cards with them, create and fetch bills. Requests are
//! authenticated with HTTP Basic using the account's API key as username
//! and an empty password; bodies go out and come back as JSON.
//!
//! ```no_run
//! use vindi::VindiClient;
//!
//! # async fn run() -> vindi::Result<()> {
//! let mut client = VindiClient::new("my-api-key");
//! let customer_id = client
//!     .create_customer("Jane Doe", "jane@example.com", "ext-42")
//!     .await?;
//! println!("registered customer {customer_id}");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::client::{VindiClient, DEFAULT_BASE_URL};
pub use domain::ports::{ApiKey, RawResponse, RequestSpec, Transport, TransportBox};
pub use domain::resources::{BillItem, NewBill, NewCustomer, NewPaymentProfile};
pub use domain::response::ResponseRecord;
pub use error::{GatewayError, Result};
pub use infrastructure::http::{ConnectionLifecycle, HttpTransport};
pub use infrastructure::in_memory::InMemoryTransport;

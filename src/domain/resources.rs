use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    /// Code tracking the customer outside the gateway.
    pub code: String,
}

/// Body of `POST /payment_profiles`: a card to associate with a customer.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentProfile {
    pub holder_name: String,
    /// Expiration date as `mm/YY`.
    pub card_expiration: String,
    pub card_number: String,
    pub card_cvv: String,
    /// Customer id registered on the gateway.
    pub customer_id: u64,
}

// Card number and CVV must never end up in logs or error chains.
impl fmt::Debug for NewPaymentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewPaymentProfile")
            .field("holder_name", &self.holder_name)
            .field("card_expiration", &self.card_expiration)
            .field("card_number", &"****")
            .field("card_cvv", &"****")
            .field("customer_id", &self.customer_id)
            .finish()
    }
}

/// Body of `POST /bills`. This requests a charge; it is not the invoice
/// itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    pub customer_id: u64,
    pub payment_method_code: String,
    pub bill_items: Vec<BillItem>,
}

/// A single bill line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub product_id: u64,
    pub amount: Decimal,
}

/// The slice of a `POST /customers` response the client extracts.
#[derive(Debug, Deserialize)]
pub struct CreatedCustomer {
    pub customer: CustomerRef,
}

#[derive(Debug, Deserialize)]
pub struct CustomerRef {
    pub id: u64,
}

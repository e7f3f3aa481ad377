use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pricing::{OrderSummary, PricedLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartRequest {
    pub item_id: u32,
    pub delta: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub lines: Vec<PricedLine>,
    pub item_count: u64,
    pub summary: Option<OrderSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Gpay,
    Paypal,
    Paytm,
    Card,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Gpay,
        PaymentMethod::Paypal,
        PaymentMethod::Paytm,
        PaymentMethod::Card,
        PaymentMethod::Wallet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Gpay => "Google Pay",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Paytm => "Paytm",
            PaymentMethod::Card => "Debit Card",
            PaymentMethod::Wallet => "KrishiMitra Wallet",
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentOption {
    pub id: PaymentMethod,
    pub name: String,
}

pub fn payment_options() -> Vec<PaymentOption> {
    PaymentMethod::ALL
        .into_iter()
        .map(|id| PaymentOption {
            id,
            name: id.label().to_string(),
        })
        .collect()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Receipt {
    pub reference: String,
    pub payment_method: PaymentMethod,
    pub lines: Vec<PricedLine>,
    pub summary: OrderSummary,
}

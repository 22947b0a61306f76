//! Store API request and response models.

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillpoint::cart::Cart;

/// Payment methods the transaction endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Card")]
    Card,
    #[serde(rename = "QR Code")]
    QrCode,
}

/// One ordered line of a transaction request.
///
/// This is the minimal cart representation: no prices and no discounts,
/// the server recomputes every monetary field authoritatively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionItem {
    pub product_id: i64,
    pub quantity: u32,
}

/// Body for `POST /transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub items: Vec<TransactionItem>,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_phone: Option<String>,
}

impl TransactionRequest {
    /// Build the request for a cart, preserving line order.
    pub fn for_cart(
        cart: &Cart,
        payment_method: PaymentMethod,
        member_phone: Option<&str>,
    ) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| TransactionItem {
                    product_id: line.product().product_id,
                    quantity: line.quantity(),
                })
                .collect(),
            payment_method,
            member_phone: member_phone.map(str::to_owned),
        }
    }
}

/// Authoritative transaction as computed by the store API.
///
/// These totals supersede any local estimate wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub subtotal: Decimal,
    pub product_discount: Decimal,
    pub membership_discount: Decimal,
    pub total_amount: Decimal,
}

/// Body for `POST /members`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMember {
    pub name: String,
    pub phone: String,
}

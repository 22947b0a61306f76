//! Catalog

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::promotions::PromotionId;

/// Product identifier assigned by the external catalog service.
pub type ProductId = i64;

/// Read-only snapshot of a catalog product.
///
/// Snapshots are fetched on search or barcode scan and are not refreshed
/// behind the till's back; a line added to the cart keeps the snapshot it
/// was created from until it is explicitly replaced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub product_id: ProductId,

    /// Scannable barcode.
    pub barcode: String,

    /// Display name.
    pub name: String,

    /// Brand, when recorded.
    #[serde(default)]
    pub brand: Option<String>,

    /// Category, when recorded.
    #[serde(default)]
    pub category: Option<String>,

    /// Unit selling price. The wire carries this as a number or a string;
    /// both decode.
    pub selling_price: Decimal,

    /// Units on hand, the ceiling for cart quantities.
    pub stock_quantity: u32,

    /// Promotion linked to this product, when one is running.
    #[serde(default)]
    pub promotion_id: Option<PromotionId>,
}

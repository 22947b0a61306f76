//! Store API client.
//!
//! [`SalesApi`] is the seam between the cart engine and the external store
//! API; [`HttpSalesApi`] is the production implementation. Tests mock the
//! trait to drive checkout without a network.

use async_trait::async_trait;
use mockall::automock;
use tillpoint::{catalog::Product, members::Member, promotions::Promotion};

pub mod errors;
mod http;
pub mod models;

pub use errors::ApiError;
pub use http::HttpSalesApi;

use models::{NewMember, Transaction, TransactionRequest};

/// Client surface of the external store API.
#[automock]
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Search catalog products by name, brand, category, or barcode text.
    async fn search_products(&self, q: &str) -> Result<Vec<Product>, ApiError>;

    /// Look up catalog products by exact barcode.
    async fn product_by_barcode(&self, barcode: &str) -> Result<Vec<Product>, ApiError>;

    /// Fetch the promotions currently flagged active.
    async fn active_promotions(&self) -> Result<Vec<Promotion>, ApiError>;

    /// Search members; the query is matched server-side as a substring.
    async fn find_members(&self, q: &str) -> Result<Vec<Member>, ApiError>;

    /// Register a new member.
    async fn create_member(&self, member: NewMember) -> Result<Member, ApiError>;

    /// Submit an order intent. The server computes all monetary fields and
    /// commits stock decrements; nothing is assumed client-side.
    async fn submit_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<Transaction, ApiError>;
}

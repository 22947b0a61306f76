//! Tillpoint
//!
//! Tillpoint is a point-of-sale cart engine: an in-memory cart with
//! stock-bounded quantities, promotion and membership discount estimation,
//! and receipt totals. It sits in front of an external store API that owns
//! the authoritative numbers; everything computed here is a preview for the
//! cashier, superseded by the server's transaction once a sale commits.

pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod estimate;
pub mod members;
pub mod prelude;
pub mod promotions;
pub mod receipt;

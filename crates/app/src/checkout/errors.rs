//! Checkout errors.

use thiserror::Error;
use tillpoint::members::PhoneError;

use crate::{api::ApiError, auth::AuthError};

/// Errors surfaced by checkout submission.
///
/// Every variant is recoverable at the till: the cart and entered fields
/// are preserved, and the cashier may correct the input and retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No token on the session; nothing was submitted.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The member phone failed local validation.
    #[error(transparent)]
    Phone(#[from] PhoneError),

    /// A line's quantity exceeds the stock known for its product.
    #[error("insufficient stock for {name}: {available} available")]
    InsufficientStock {
        /// Product display name.
        name: String,
        /// Units the catalog snapshot reports on hand.
        available: u32,
    },

    /// A checkout is already being submitted.
    #[error("checkout already in progress")]
    InFlight,

    /// The store API rejected or could not process the transaction.
    #[error(transparent)]
    Api(#[from] ApiError),
}

//! Discount arithmetic
//!
//! Shared helpers for promotion and membership discount calculations.
//! All monetary results are rounded to two decimal places, away from zero
//! on midpoints, so the preview matches the server's decimal arithmetic.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::{
    cart::CartLine,
    promotions::{DiscountKind, Promotion},
};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation overflowed or could not be safely represented.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Fixed discount amount overflowed.
    #[error("discount amount overflowed")]
    AmountOverflow,
}

/// Round a monetary amount to two decimal places.
pub(crate) fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculate `rate` percent of `amount`, rounded to two decimal places.
///
/// `rate` is expressed in whole percentage points: `5` means 5%.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation
/// overflows the decimal range.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Result<Decimal, DiscountError> {
    let ratio = rate
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(DiscountError::PercentConversion)?;
    let percent = Percentage::from(ratio);

    (percent * Decimal::ONE) // the percentage crate doesn't expose the underlying Decimal
        .checked_mul(amount)
        .map(round_money)
        .ok_or(DiscountError::PercentConversion)
}

/// Promotion discount for one cart line.
///
/// Percentage promotions take `discount_value` percent of the line total;
/// fixed promotions take `discount_value` off every unit. The result is
/// capped at the line total, so a promotion can at most make the line free.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the calculation overflows.
pub fn line_discount(line: &CartLine, promotion: &Promotion) -> Result<Decimal, DiscountError> {
    let line_total = line.line_total();

    let discount = match promotion.discount_type {
        DiscountKind::Percentage => percent_of(line_total, promotion.discount_value)?,
        DiscountKind::Fixed => promotion
            .discount_value
            .checked_mul(Decimal::from(line.quantity()))
            .map(round_money)
            .ok_or(DiscountError::AmountOverflow)?,
    };

    Ok(discount.min(line_total))
}

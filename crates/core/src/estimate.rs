//! Sale estimation

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    cart::Cart,
    discounts::{self, DiscountError},
    promotions::{Promotion, PromotionIndex},
};

/// Pre-submission totals preview for the active cart.
///
/// Purely advisory: the transaction returned by the store API supersedes
/// every field here once the sale commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Sum of line totals before any discount.
    pub subtotal: Decimal,

    /// Promotion discount summed across all lines.
    pub promo_discount: Decimal,

    /// Subtotal with promotion discounts taken off.
    pub subtotal_after_promo: Decimal,

    /// Membership discount, taken on the post-promotion remainder.
    pub member_discount: Decimal,

    /// Amount the cashier should expect the server to charge.
    pub total: Decimal,

    /// Indexes of cart lines that paid full price.
    pub full_price_lines: SmallVec<[usize; 10]>,
}

impl Estimate {
    /// Total savings relative to the undiscounted subtotal.
    pub fn savings(&self) -> Decimal {
        self.promo_discount + self.member_discount
    }
}

/// Estimate totals for `cart` under `promotions` and a member discount
/// rate in percentage points (`0` when no member is attached or the
/// lookup has not resolved).
///
/// Promotion discounts apply first, per line, matched through each
/// product's linked promotion identifier; the membership rate then applies
/// to the post-promotion remainder. The server computes in this same
/// order, so swapping it would break estimate/server parity.
///
/// Recompute after every cart, promotion-list, or member-rate change;
/// nothing is cached between calls.
///
/// # Errors
///
/// Returns a [`DiscountError`] if a discount calculation overflows.
pub fn estimate(
    cart: &Cart,
    promotions: &[Promotion],
    member_rate: Decimal,
) -> Result<Estimate, DiscountError> {
    let index = PromotionIndex::new(promotions);
    let subtotal = cart.subtotal();

    let mut promo_discount = Decimal::ZERO;
    let mut full_price_lines = SmallVec::new();

    for (i, line) in cart.lines().iter().enumerate() {
        let promotion = line
            .product()
            .promotion_id
            .and_then(|id| index.find(id));

        match promotion {
            Some(promotion) => {
                let discount = discounts::line_discount(line, promotion)?;
                if discount == Decimal::ZERO {
                    full_price_lines.push(i);
                }
                promo_discount += discount;
            }
            None => full_price_lines.push(i),
        }
    }

    let subtotal_after_promo = subtotal - promo_discount;

    let member_discount = if member_rate > Decimal::ZERO {
        discounts::percent_of(subtotal_after_promo, member_rate)?
    } else {
        Decimal::ZERO
    };

    let total = subtotal_after_promo - member_discount;

    Ok(Estimate {
        subtotal,
        promo_discount,
        subtotal_after_promo,
        member_discount,
        total,
        full_price_lines,
    })
}

//! Receipt

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

use crate::estimate::Estimate;

/// Totals for one sale, as shown to the cashier.
///
/// A receipt is first built provisionally from the local [`Estimate`],
/// then rebuilt from the store API's transaction once the sale commits.
/// Confirmed totals replace provisional ones outright; the two are never
/// merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    subtotal: Decimal,
    total: Decimal,
    confirmed: bool,
}

impl Receipt {
    /// Provisional receipt from the local estimate.
    #[must_use]
    pub fn provisional(estimate: &Estimate) -> Self {
        Self {
            subtotal: estimate.subtotal,
            total: estimate.total,
            confirmed: false,
        }
    }

    /// Authoritative receipt from server-computed totals.
    #[must_use]
    pub fn confirmed(subtotal: Decimal, total: Decimal) -> Self {
        Self {
            subtotal,
            total,
            confirmed: true,
        }
    }

    /// Total cost before any discount.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Amount charged (or expected to be charged) for the sale.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Whether these totals came back from the transaction service.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Savings relative to the undiscounted subtotal.
    pub fn savings(&self) -> Decimal {
        self.subtotal - self.total
    }
}

/// Format an amount in the till's display currency.
pub fn format_amount(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::THB).to_string()
}

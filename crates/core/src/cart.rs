//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::{Product, ProductId};

/// Errors surfaced by cart mutations.
///
/// These are recoverable, user-correctable conditions; the cart is left
/// untouched whenever one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity exceeds the stock on hand for a product.
    #[error("insufficient stock for {name}: {available} available")]
    InsufficientStock {
        /// Product display name, for the message shown at the till.
        name: String,
        /// Units the catalog snapshot reports on hand.
        available: u32,
    },
}

/// One product awaiting checkout, with the desired quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// The product snapshot this line was created from.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Requested quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `selling_price × quantity` for this line.
    pub fn line_total(&self) -> Decimal {
        self.product.selling_price * Decimal::from(self.quantity)
    }
}

/// In-memory cart for the active sale.
///
/// Holds at most one line per product identifier and keeps every quantity
/// within `1..=stock_quantity` at each mutation. Purely local state; no
/// network calls happen here.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// Creates a new line at quantity 1, or increments the existing line
    /// for the same product identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InsufficientStock`] when the resulting quantity
    /// would exceed the product's stock; the cart is not mutated.
    pub fn add(&mut self, product: Product) -> Result<(), CartError> {
        if let Some(line) = self.line_mut(product.product_id) {
            let requested = line.quantity.saturating_add(1);
            if requested > line.product.stock_quantity {
                return Err(CartError::InsufficientStock {
                    name: line.product.name.clone(),
                    available: line.product.stock_quantity,
                });
            }
            line.quantity = requested;
            return Ok(());
        }

        if product.stock_quantity == 0 {
            return Err(CartError::InsufficientStock {
                available: 0,
                name: product.name,
            });
        }

        self.lines.push(CartLine {
            product,
            quantity: 1,
        });

        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// Requests below 1 are clamped to 1. An unknown product identifier is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InsufficientStock`] when the request exceeds
    /// the line's stock ceiling; the prior quantity is kept.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        let Some(line) = self.line_mut(product_id) else {
            return Ok(());
        };

        let requested = quantity.max(1);
        if requested > line.product.stock_quantity {
            return Err(CartError::InsufficientStock {
                name: line.product.name.clone(),
                available: line.product.stock_quantity,
            });
        }

        line.quantity = requested;

        Ok(())
    }

    /// Delete the line for `product_id`. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.product_id != product_id);
    }

    /// Empty the cart. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replace the stored snapshot for a product without touching the
    /// line's quantity. Returns whether a line matched.
    ///
    /// A refreshed snapshot may report less stock than the quantity already
    /// requested; checkout re-validates every line against its snapshot
    /// before submitting.
    pub fn refresh_product(&mut self, product: Product) -> bool {
        match self.line_mut(product.product_id) {
            Some(line) => {
                line.product = product;
                true
            }
            None => false,
        }
    }

    /// Sum of `selling_price × quantity` over all lines.
    ///
    /// Recomputed on every call; nothing is cached across mutations.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `product_id`.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product.product_id == product_id)
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.product_id == product_id)
    }
}

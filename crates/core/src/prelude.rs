//! Tillpoint prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{Product, ProductId},
    discounts::DiscountError,
    estimate::{Estimate, estimate},
    members::{Member, MemberId, PhoneError, find_by_phone, validate_phone},
    promotions::{DiscountKind, Promotion, PromotionId, PromotionIndex},
    receipt::{Receipt, format_amount},
};

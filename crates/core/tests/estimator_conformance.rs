//! Checkout preview conformance tests
//!
//! End-to-end cases for the cart-and-discount pipeline, pinned to the
//! numbers the transaction service produces for the same inputs.

use jiff::civil::date;
use rust_decimal::Decimal;
use testresult::TestResult;
use tillpoint::prelude::*;

fn water(promotion_id: Option<PromotionId>) -> Product {
    Product {
        product_id: 1,
        barcode: "8850000000017".to_owned(),
        name: "Drinking Water 600ml".to_owned(),
        brand: Some("Aqua".to_owned()),
        category: Some("Beverages".to_owned()),
        selling_price: Decimal::from(100),
        stock_quantity: 10,
        promotion_id,
    }
}

fn ten_percent_off() -> Promotion {
    Promotion {
        promotion_id: 3,
        promotion_name: "August 10% Off".to_owned(),
        discount_type: DiscountKind::Percentage,
        discount_value: Decimal::TEN,
        start_date: date(2026, 8, 1),
        end_date: date(2026, 8, 31),
        is_active: true,
    }
}

fn two_of_water(promotion_id: Option<PromotionId>) -> TestResult<Cart> {
    let mut cart = Cart::new();
    cart.add(water(promotion_id))?;
    cart.set_quantity(1, 2)?;
    Ok(cart)
}

#[test]
fn plain_cart_totals_to_its_subtotal() -> TestResult {
    let cart = two_of_water(None)?;

    let result = estimate(&cart, &[], Decimal::ZERO)?;

    assert_eq!(result.subtotal, Decimal::from(200));
    assert_eq!(result.promo_discount, Decimal::ZERO);
    assert_eq!(result.member_discount, Decimal::ZERO);
    assert_eq!(result.total, Decimal::from(200));

    Ok(())
}

#[test]
fn linked_percentage_promotion_discounts_the_line() -> TestResult {
    let cart = two_of_water(Some(3))?;

    let result = estimate(&cart, &[ten_percent_off()], Decimal::ZERO)?;

    assert_eq!(result.promo_discount, Decimal::from(20));
    assert_eq!(result.subtotal_after_promo, Decimal::from(180));
    assert_eq!(result.total, Decimal::from(180));

    Ok(())
}

#[test]
fn member_rate_applies_to_the_post_promotion_remainder() -> TestResult {
    let cart = two_of_water(Some(3))?;

    let result = estimate(&cart, &[ten_percent_off()], Decimal::from(5))?;

    assert_eq!(result.promo_discount, Decimal::from(20));
    // 5% of the discounted 180, not of the raw 200.
    assert_eq!(result.member_discount, Decimal::from(9));
    assert_eq!(result.total, Decimal::from(171));

    Ok(())
}

#[test]
fn over_stock_quantity_is_rejected_and_the_cart_is_unchanged() -> TestResult {
    let mut cart = Cart::new();
    let mut limited = water(None);
    limited.stock_quantity = 3;
    cart.add(limited)?;
    cart.set_quantity(1, 2)?;

    let result = cart.set_quantity(1, 5);

    assert_eq!(
        result,
        Err(CartError::InsufficientStock {
            name: "Drinking Water 600ml".to_owned(),
            available: 3,
        })
    );
    assert_eq!(cart.line(1).map(CartLine::quantity), Some(2));

    Ok(())
}

#[test]
fn estimate_matches_the_discount_ordering_law() -> TestResult {
    let cart = two_of_water(Some(3))?;
    let rate = Decimal::from(5);

    let result = estimate(&cart, &[ten_percent_off()], rate)?;

    // total == (subtotal - promoDiscount) × (1 - rate/100)
    let law = (result.subtotal - result.promo_discount)
        * (Decimal::ONE - rate / Decimal::ONE_HUNDRED);

    assert_eq!(result.total, law);

    Ok(())
}

#[test]
fn membership_before_promotion_would_give_a_different_total() -> TestResult {
    let cart = two_of_water(Some(3))?;
    let rate = Decimal::from(5);

    let result = estimate(&cart, &[ten_percent_off()], rate)?;

    // Reversed pipeline: membership on the raw subtotal, promotion after.
    // 200 × 5% = 10, then minus the 20 promotion discount = 170.
    let reversed = result.subtotal
        - (result.subtotal * rate / Decimal::ONE_HUNDRED)
        - result.promo_discount;

    assert_ne!(
        result.total, reversed,
        "promotion-first and membership-first must not agree when both discounts are non-zero"
    );
    assert_eq!(result.total, Decimal::from(171));
    assert_eq!(reversed, Decimal::from(170));

    Ok(())
}

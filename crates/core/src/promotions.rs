//! Promotions

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Promotion identifier assigned by the external promotion service.
pub type PromotionId = i64;

/// How a promotion's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// `discount_value` is a percentage taken off the line total.
    Percentage,

    /// `discount_value` is an amount taken off every unit on the line.
    Fixed,
}

/// A time-bounded discount attachable to catalog products.
///
/// Read-only external data: the list is fetched before checkout and
/// refreshed after each committed sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Promotion {
    /// Promotion identifier.
    pub promotion_id: PromotionId,

    /// Display name.
    pub promotion_name: String,

    /// Discount interpretation.
    pub discount_type: DiscountKind,

    /// Percentage points or amount per unit, per `discount_type`.
    pub discount_value: Decimal,

    /// First day the promotion runs, inclusive.
    pub start_date: Date,

    /// Last day the promotion runs, inclusive.
    pub end_date: Date,

    /// Whether the promotion is switched on at all.
    pub is_active: bool,
}

impl Promotion {
    /// Whether the promotion is flagged active and `date` falls inside its
    /// inclusive window.
    pub fn is_active_on(&self, date: Date) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }
}

/// Identifier-keyed lookup over a promotion list.
#[derive(Debug)]
pub struct PromotionIndex<'a> {
    by_id: FxHashMap<PromotionId, &'a Promotion>,
}

impl<'a> PromotionIndex<'a> {
    /// Index `promotions` by identifier.
    #[must_use]
    pub fn new(promotions: &'a [Promotion]) -> Self {
        Self {
            by_id: promotions
                .iter()
                .map(|promotion| (promotion.promotion_id, promotion))
                .collect(),
        }
    }

    /// The promotion with the given identifier, if present.
    pub fn find(&self, id: PromotionId) -> Option<&'a Promotion> {
        self.by_id.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn promotion(id: PromotionId, active: bool) -> Promotion {
        Promotion {
            promotion_id: id,
            promotion_name: format!("Promo {id}"),
            discount_type: DiscountKind::Percentage,
            discount_value: Decimal::TEN,
            start_date: date(2026, 8, 1),
            end_date: date(2026, 8, 31),
            is_active: active,
        }
    }

    #[test]
    fn active_window_is_inclusive_on_both_ends() {
        let promo = promotion(1, true);

        assert!(promo.is_active_on(date(2026, 8, 1)));
        assert!(promo.is_active_on(date(2026, 8, 31)));
        assert!(!promo.is_active_on(date(2026, 7, 31)));
        assert!(!promo.is_active_on(date(2026, 9, 1)));
    }

    #[test]
    fn inactive_flag_overrides_the_window() {
        let promo = promotion(1, false);

        assert!(!promo.is_active_on(date(2026, 8, 15)));
    }

    #[test]
    fn index_finds_by_identifier() {
        let promotions = [promotion(1, true), promotion(7, true)];
        let index = PromotionIndex::new(&promotions);

        assert_eq!(index.find(7).map(|p| p.promotion_id), Some(7));
        assert_eq!(index.find(2), None);
    }

    #[test]
    fn deserializes_wire_discount_types() -> TestResult {
        let promo: Promotion = serde_json::from_str(
            r#"{
                "promotion_id": 3,
                "promotion_name": "Summer Fixed",
                "discount_type": "FIXED",
                "discount_value": "2.00",
                "start_date": "2026-08-01",
                "end_date": "2026-08-31",
                "is_active": true
            }"#,
        )?;

        assert_eq!(promo.discount_type, DiscountKind::Fixed);
        assert_eq!(promo.discount_value, Decimal::new(2_00, 2));
        assert_eq!(promo.start_date, date(2026, 8, 1));

        Ok(())
    }
}

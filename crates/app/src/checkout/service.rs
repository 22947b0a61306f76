//! Checkout submitter.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, warn};

use tillpoint::{cart::Cart, members, promotions::Promotion};

use crate::{
    api::{
        SalesApi,
        models::{PaymentMethod, Transaction, TransactionRequest},
    },
    auth::Session,
    checkout::errors::CheckoutError,
};

/// Result of a committed sale.
///
/// `transaction` carries the server-computed totals that supersede any
/// local estimate. `promotions` is the refreshed active-promotion list;
/// `None` means the refresh failed and the previous list stays in use.
#[derive(Debug)]
pub struct SaleOutcome {
    /// The authoritative transaction.
    pub transaction: Transaction,

    /// Active promotions as of just after the sale.
    pub promotions: Option<Vec<Promotion>>,
}

/// Submits order intents to the store API and reconciles local state
/// against the authoritative response.
///
/// The service performs no optimistic stock decrement and no promotion
/// invalidation of its own; the transaction endpoint is the sole authority
/// for committing state changes.
pub struct CheckoutService {
    api: Arc<dyn SalesApi>,
    session: Session,
    in_flight: AtomicBool,
}

impl CheckoutService {
    /// Create a submitter over `api` for the given session.
    #[must_use]
    pub fn new(api: Arc<dyn SalesApi>, session: Session) -> Self {
        Self {
            api,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Validate and submit the cart as a transaction.
    ///
    /// All preconditions run before any network call: a signed-in session,
    /// a non-empty cart, a well-formed member phone when one was entered,
    /// and quantities within each line's stock ceiling (re-checked here to
    /// catch stale stock data). A second call while one is pending returns
    /// [`CheckoutError::InFlight`] without touching the network.
    ///
    /// On success the cart is cleared and the active promotion list is
    /// refreshed once. On any failure the cart and entered fields are left
    /// untouched; the caller may correct and retry.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first failed precondition
    /// or the store API's rejection.
    #[tracing::instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        member_phone: Option<&str>,
    ) -> Result<SaleOutcome, CheckoutError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CheckoutError::InFlight);
        }

        let result = self.submit_inner(cart, payment_method, member_phone).await;
        self.in_flight.store(false, Ordering::SeqCst);

        result
    }

    async fn submit_inner(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        member_phone: Option<&str>,
    ) -> Result<SaleOutcome, CheckoutError> {
        self.session.bearer()?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(phone) = member_phone {
            members::validate_phone(phone)?;
        }

        // Stock may have moved since the lines were added.
        for line in cart.lines() {
            if line.quantity() > line.product().stock_quantity {
                return Err(CheckoutError::InsufficientStock {
                    name: line.product().name.clone(),
                    available: line.product().stock_quantity,
                });
            }
        }

        let request = TransactionRequest::for_cart(cart, payment_method, member_phone);
        let transaction = self.api.submit_transaction(request).await?;

        debug!(
            transaction_id = transaction.transaction_id,
            "sale committed"
        );

        cart.clear();

        // The sale may have depleted stock or retired a limited promotion.
        let promotions = match self.api.active_promotions().await {
            Ok(promotions) => Some(promotions),
            Err(error) => {
                warn!(%error, "promotion refresh after sale failed");
                None
            }
        };

        Ok(SaleOutcome {
            transaction,
            promotions,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use testresult::TestResult;
    use tokio::sync::Notify;

    use tillpoint::{catalog::Product, members::Member};

    use crate::{
        api::{ApiError, MockSalesApi, models::NewMember},
        test::helpers,
    };

    use super::*;

    fn quiet_mock() -> MockSalesApi {
        let mut api = MockSalesApi::new();
        api.expect_submit_transaction().never();
        api.expect_active_promotions().never();
        api
    }

    fn service(api: MockSalesApi) -> CheckoutService {
        CheckoutService::new(Arc::new(api), helpers::signed_in())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_network_call() {
        let service = service(quiet_mock());
        let mut cart = Cart::new();

        let result = service.submit(&mut cart, PaymentMethod::Cash, None).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn signed_out_session_is_rejected_before_any_network_call() -> TestResult {
        let service = CheckoutService::new(Arc::new(quiet_mock()), Session::signed_out());
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 100_00, 5))?;

        let result = service.submit(&mut cart, PaymentMethod::Cash, None).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Auth(crate::auth::AuthError::NotSignedIn))
        ));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_member_phone_is_rejected_before_any_network_call() -> TestResult {
        let service = service(quiet_mock());
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 100_00, 5))?;

        let result = service
            .submit(&mut cart, PaymentMethod::Cash, Some("081-234-567"))
            .await;

        assert!(matches!(result, Err(CheckoutError::Phone(_))));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn stale_over_stock_line_is_rejected_at_submit_time() -> TestResult {
        let service = service(quiet_mock());
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 100_00, 5))?;
        cart.set_quantity(1, 5)?;

        // A fresh snapshot reports less stock than already requested.
        cart.refresh_product(helpers::product(1, 100_00, 3));

        let result = service.submit(&mut cart, PaymentMethod::Cash, None).await;

        assert!(matches!(
            result,
            Err(CheckoutError::InsufficientStock { available: 3, .. })
        ));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn successful_sale_clears_the_cart_and_refreshes_promotions_once() -> TestResult {
        let mut api = MockSalesApi::new();
        api.expect_submit_transaction()
            .withf(|request| {
                request.items.len() == 2
                    && request.member_phone.as_deref() == Some("0812345678")
            })
            .times(1)
            .returning(|_| Ok(helpers::transaction(171_00)));
        api.expect_active_promotions()
            .times(1)
            .returning(|| Ok(Vec::new()));

        let service = service(api);
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 100_00, 5))?;
        cart.add(helpers::product(2, 4_00, 5))?;

        let outcome = service
            .submit(&mut cart, PaymentMethod::Cash, Some("0812345678"))
            .await?;

        assert_eq!(outcome.transaction.total_amount, helpers::money(171_00));
        assert_eq!(outcome.promotions, Some(Vec::new()));
        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn rejected_sale_preserves_the_cart_and_skips_the_refresh() -> TestResult {
        let mut api = MockSalesApi::new();
        api.expect_submit_transaction().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: "Insufficient stock for product Drinking Water 600ml".to_owned(),
            })
        });
        api.expect_active_promotions().never();

        let service = service(api);
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 100_00, 5))?;

        let result = service.submit(&mut cart, PaymentMethod::Card, None).await;

        assert!(matches!(result, Err(CheckoutError::Api(_))));
        assert_eq!(cart.len(), 1, "a failed checkout must not clear the cart");

        Ok(())
    }

    #[tokio::test]
    async fn failed_promotion_refresh_does_not_fail_the_sale() -> TestResult {
        let mut api = MockSalesApi::new();
        api.expect_submit_transaction()
            .times(1)
            .returning(|_| Ok(helpers::transaction(50_00)));
        api.expect_active_promotions()
            .times(1)
            .returning(|| {
                Err(ApiError::UnexpectedResponse("connection reset".to_owned()))
            });

        let service = service(api);
        let mut cart = Cart::new();
        cart.add(helpers::product(1, 50_00, 5))?;

        let outcome = service.submit(&mut cart, PaymentMethod::Cash, None).await?;

        assert!(outcome.promotions.is_none());
        assert!(cart.is_empty());

        Ok(())
    }

    /// Stub API whose transaction call blocks until released, so a second
    /// submission can race the first.
    #[derive(Default)]
    struct BlockingApi {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl SalesApi for BlockingApi {
        async fn search_products(&self, _q: &str) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn product_by_barcode(&self, _barcode: &str) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn active_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
            Ok(Vec::new())
        }

        async fn find_members(&self, _q: &str) -> Result<Vec<Member>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_member(&self, _member: NewMember) -> Result<Member, ApiError> {
            Err(ApiError::UnexpectedResponse("not used".to_owned()))
        }

        async fn submit_transaction(
            &self,
            _request: TransactionRequest,
        ) -> Result<Transaction, ApiError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(helpers::transaction(171_00))
        }
    }

    #[tokio::test]
    async fn second_submission_is_rejected_while_one_is_in_flight() -> TestResult {
        let api = Arc::new(BlockingApi::default());
        let service = Arc::new(CheckoutService::new(api.clone(), helpers::signed_in()));

        let mut first_cart = Cart::new();
        first_cart.add(helpers::product(1, 100_00, 5))?;

        let submitting = Arc::clone(&service);
        let first = tokio::spawn(async move {
            let mut cart = first_cart;
            submitting.submit(&mut cart, PaymentMethod::Cash, None).await
        });

        api.started.notified().await;

        let mut second_cart = Cart::new();
        second_cart.add(helpers::product(2, 4_00, 5))?;
        let second = service.submit(&mut second_cart, PaymentMethod::Cash, None).await;

        assert!(matches!(second, Err(CheckoutError::InFlight)));
        assert_eq!(second_cart.len(), 1, "the blocked submission must not mutate state");

        api.release.notify_one();
        let outcome = first.await??;

        assert_eq!(outcome.transaction.total_amount, helpers::money(171_00));

        Ok(())
    }
}

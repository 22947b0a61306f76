//! Debounced, latest-wins lookups.
//!
//! Search-as-you-type and member-rate resolution can have several requests
//! in flight at once; only the response for the most recently issued input
//! may be applied. Each lookup takes a sequence number from a
//! [`LookupGuard`]; the settle delay runs before the request fires, and
//! the result is dropped whenever a newer lookup started in the meantime.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use rust_decimal::Decimal;
use tracing::debug;

use tillpoint::members::{self, Member};

use crate::api::SalesApi;

/// Settle delay before a type-ahead lookup fires.
pub const SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Monotonic generation counter for one lookup channel.
///
/// Starting a new lookup supersedes every earlier one on the same guard;
/// superseded lookups are cancelled before they fire, or their responses
/// ignored if already in flight.
#[derive(Debug, Default)]
pub struct LookupGuard {
    latest: AtomicU64,
}

impl LookupGuard {
    /// Create a guard with no lookups issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

/// Run `fetch` after `delay`, suppressing stale results.
///
/// Returns `None` when this lookup was superseded, either before the delay
/// elapsed (the request never fires) or while the request was in flight
/// (the response is dropped).
pub async fn debounced<T, F, Fut>(guard: &LookupGuard, delay: Duration, fetch: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let seq = guard.begin();

    tokio::time::sleep(delay).await;
    if !guard.is_current(seq) {
        return None;
    }

    let value = fetch().await;
    if !guard.is_current(seq) {
        debug!(seq, "dropping stale lookup response");
        return None;
    }

    Some(value)
}

/// Resolve the membership discount rate for a phone entered at the till.
///
/// Any failure resolves to a zero rate so the sale can proceed without a
/// member attached: a malformed phone, a transport error, an empty result,
/// or results with no exact phone match.
pub async fn resolve_member_rate(api: &dyn SalesApi, phone: &str) -> Decimal {
    if members::validate_phone(phone).is_err() {
        return Decimal::ZERO;
    }

    match api.find_members(phone).await {
        Ok(results) => members::find_by_phone(&results, phone)
            .map_or(Decimal::ZERO, Member::effective_discount_rate),
        Err(error) => {
            debug!(%error, "member lookup failed; continuing without a discount");
            Decimal::ZERO
        }
    }
}

//! Members

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Member identifier assigned by the external membership service.
pub type MemberId = i64;

/// Errors raised by member input validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// The phone as entered is not exactly ten digits.
    #[error("member phone must be exactly 10 digits")]
    Malformed,
}

/// Member snapshot from the membership lookup endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Member {
    /// Membership identifier.
    pub member_id: MemberId,

    /// Registered name.
    pub name: String,

    /// Registered 10-digit phone, the lookup key used at the till.
    pub phone: String,

    /// Rate stored from the last tier evaluation, in percentage points.
    pub discount_rate: Decimal,

    /// Rate for the member's rolling-year spend tier, when the endpoint
    /// provides it.
    #[serde(default)]
    pub current_discount_rate: Option<Decimal>,

    /// Tier name, when the endpoint provides it.
    #[serde(default)]
    pub membership_rank: Option<String>,
}

impl Member {
    /// Discount rate to apply at checkout, in percentage points.
    ///
    /// The rolling-year tier rate supersedes the stored rate; the server
    /// charges by the tier rate, so the preview must too.
    pub fn effective_discount_rate(&self) -> Decimal {
        self.current_discount_rate.unwrap_or(self.discount_rate)
    }
}

/// Validate a member phone as entered at the till.
///
/// # Errors
///
/// Returns [`PhoneError::Malformed`] unless the input is exactly ten
/// ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), PhoneError> {
    if phone.len() == 10 && phone.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PhoneError::Malformed)
    }
}

/// Exact-phone match over a lookup result list.
///
/// The lookup endpoint matches substrings server-side; the till only
/// attaches a member on an exact phone match. Empty or non-matching
/// results mean no member and no discount.
pub fn find_by_phone<'a>(members: &'a [Member], phone: &str) -> Option<&'a Member> {
    members.iter().find(|member| member.phone == phone)
}

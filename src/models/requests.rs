//! # API Request Models
//!
//! Structures for incoming API request bodies.
//! Each struct represents the expected JSON body for an endpoint.

use serde::{Deserialize, Serialize};

/// Request to authenticate or register a user.
///
/// ## Example JSON
///
/// ```json
/// {
///     "telegram_id": "123456789"
/// }
/// ```
///
/// `telegram_id` is optional at the serde level so a missing field
/// reaches the handler and produces the service's structured 400
/// instead of a framework deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Opaque external identifier, accepted at face value.
    pub telegram_id: Option<String>,
}

/// Request to create an obligation.
///
/// ## Example JSON
///
/// ```json
/// {
///     "user_id": 1,
///     "type": "debt",
///     "name": "card",
///     "amount": 1000
/// }
/// ```
///
/// ## Notes
///
/// - `amount` becomes both `initial_amount` and `current_amount`
/// - no range validation: negative amounts are accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateObligationRequest {
    /// Owning user's surrogate id.
    pub user_id: i64,

    /// Free-form category, e.g. "debt" or "credit".
    #[serde(rename = "type")]
    pub obligation_type: String,

    /// Display name for the obligation.
    pub name: String,

    /// Starting amount.
    pub amount: i64,
}

/// Request to record a payment against an obligation.
///
/// ## Example JSON
///
/// ```json
/// {
///     "obligation_id": 7,
///     "amount": 300
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// The obligation to apply the payment to.
    pub obligation_id: i64,

    /// Amount to subtract from the balance (clamped at zero).
    /// Unvalidated; a negative amount increases the balance.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_request_missing_telegram_id() {
        // A body without the field must still deserialize, so the
        // handler can answer with the structured validation error
        let req: AuthRequest = serde_json::from_str("{}").unwrap();
        assert!(req.telegram_id.is_none());
    }

    #[test]
    fn test_auth_request_with_telegram_id() {
        let req: AuthRequest = serde_json::from_str(r#"{"telegram_id": "42"}"#).unwrap();
        assert_eq!(req.telegram_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_obligation_request_type_field() {
        let req: CreateObligationRequest = serde_json::from_str(
            r#"{"user_id": 1, "type": "debt", "name": "card", "amount": 1000}"#,
        )
        .unwrap();
        assert_eq!(req.obligation_type, "debt");
        assert_eq!(req.amount, 1000);
    }

    #[test]
    fn test_payment_request_accepts_negative_amount() {
        let req: RecordPaymentRequest =
            serde_json::from_str(r#"{"obligation_id": 7, "amount": -300}"#).unwrap();
        assert_eq!(req.amount, -300);
    }
}

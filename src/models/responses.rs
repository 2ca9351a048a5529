//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//!
//! Row-shaped responses (`/auth`, `/obligation`, `/state`) reuse the
//! database models directly; this module adds the composites and
//! acknowledgments on top of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{ObligationRecord, PaymentRecord};

/// One obligation with its payment history embedded.
///
/// Returned by `GET /state/{user_id}` as an array element.
///
/// ## Example Response
///
/// ```json
/// [
///     {
///         "id": 7,
///         "user_id": 1,
///         "type": "debt",
///         "name": "card",
///         "initial_amount": 1000,
///         "current_amount": 700,
///         "created_at": "2025-01-01T12:00:00Z",
///         "payments": [
///             { "id": 3, "obligation_id": 7, "amount": 300, "created_at": "..." }
///         ]
///     }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationState {
    /// The obligation row, flattened into the object.
    #[serde(flatten)]
    pub obligation: ObligationRecord,

    /// Every payment applied to this obligation, in insertion order.
    pub payments: Vec<PaymentRecord>,
}

/// Acknowledgment returned by `POST /payment`.
///
/// ## Example Response
///
/// ```json
/// { "success": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAck {
    /// Always `true`; failures arrive as error responses instead.
    pub success: bool,
}

impl PaymentAck {
    /// The one acknowledgment this endpoint ever sends.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response.
///
/// Returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status string ("healthy" / "unhealthy").
    pub status: String,

    /// Whether the database answered the probe.
    pub database: bool,

    /// Backend version (from Cargo.toml).
    pub version: String,

    /// Current server time.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obligation_state_flattens_row() {
        let state = ObligationState {
            obligation: ObligationRecord {
                id: 7,
                user_id: 1,
                obligation_type: "debt".to_string(),
                name: "card".to_string(),
                initial_amount: 1000,
                current_amount: 700,
                created_at: Utc::now(),
            },
            payments: vec![PaymentRecord {
                id: 3,
                obligation_id: 7,
                amount: 300,
                created_at: Utc::now(),
            }],
        };

        let json = serde_json::to_value(&state).unwrap();
        // Obligation fields sit at the top level, not nested
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "debt");
        assert_eq!(json["current_amount"], 700);
        assert_eq!(json["payments"][0]["amount"], 300);
    }

    #[test]
    fn test_payment_ack_shape() {
        let json = serde_json::to_value(PaymentAck::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}

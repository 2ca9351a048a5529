//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! Each struct represents a row in a table.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `users` | Registered users, keyed by external `telegram_id` |
//! | `obligations` | Debts/credits with a running balance |
//! | `payments` | Append-only log of amounts applied to obligations |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌─────────────┐       ┌──────────────────┐       ┌──────────────────┐
//! │    users    │──────<│   obligations    │──────<│     payments     │
//! │             │       │                  │       │                  │
//! │ id (PK)     │       │ user_id (FK)     │       │ obligation_id(FK)│
//! │ telegram_id │       │ initial_amount   │       │ amount           │
//! │             │       │ current_amount   │       │                  │
//! └─────────────┘       └──────────────────┘       └──────────────────┘
//! ```
//!
//! ## Note on Types
//!
//! Amounts use `i64` because PostgreSQL `BIGINT` is signed. The service
//! performs no range validation, so negative amounts round-trip unchanged.
//!
//! These structs serialize with their database field names (snake_case),
//! which is the wire format clients already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a user record in the database.
///
/// Users are created on first `/auth` call for an unseen `telegram_id`
/// and never updated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned surrogate id (primary key).
    pub id: i64,

    /// External identifier supplied by the caller.
    /// Unique across users; accepted at face value.
    pub telegram_id: String,

    /// When the user was first registered.
    pub created_at: DateTime<Utc>,
}

/// Represents an obligation (debt or credit) owned by one user.
///
/// Created via `/obligation`; mutated only by payments; never deleted.
///
/// The intended invariant is `0 <= current_amount <= initial_amount`.
/// Only the lower bound is enforced (payments clamp at zero); nothing
/// stops a negative payment from pushing `current_amount` above
/// `initial_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationRecord {
    /// Store-assigned surrogate id (primary key).
    pub id: i64,

    /// Owning user.
    pub user_id: i64,

    /// Free-form category, e.g. "debt" or "credit".
    /// Named `obligation_type` in Rust because `type` is a keyword;
    /// serializes as `type` on the wire and in the database.
    #[serde(rename = "type")]
    pub obligation_type: String,

    /// Display name, e.g. "card".
    pub name: String,

    /// Amount at creation time. Fixed for the lifetime of the row.
    pub initial_amount: i64,

    /// Remaining balance. Starts equal to `initial_amount` and moves
    /// toward zero as payments accumulate.
    pub current_amount: i64,

    /// When the obligation was created.
    pub created_at: DateTime<Utc>,
}

/// Represents a payment applied against one obligation.
///
/// Immutable once created; the payments table is an append-only log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Store-assigned surrogate id (primary key).
    pub id: i64,

    /// The obligation this payment was applied to.
    pub obligation_id: i64,

    /// Amount applied. Unvalidated; may be negative.
    pub amount: i64,

    /// When the payment was recorded.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obligation_serializes_type_field() {
        let obligation = ObligationRecord {
            id: 7,
            user_id: 1,
            obligation_type: "debt".to_string(),
            name: "card".to_string(),
            initial_amount: 1000,
            current_amount: 700,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&obligation).unwrap();
        assert_eq!(json["type"], "debt");
        assert_eq!(json["initial_amount"], 1000);
        assert_eq!(json["current_amount"], 700);
        // The Rust-side field name must not leak onto the wire
        assert!(json.get("obligation_type").is_none());
    }

    #[test]
    fn test_user_serializes_snake_case() {
        let user = UserRecord {
            id: 1,
            telegram_id: "42".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["telegram_id"], "42");
    }
}

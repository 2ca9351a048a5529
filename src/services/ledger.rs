//! # Ledger Service
//!
//! The LedgerService is the central service for the obligation ledger.
//! It coordinates all store operations and owns the error taxonomy the
//! API layer maps to HTTP statuses.
//!
//! ## Responsibilities
//!
//! - Authenticate-or-register users by external `telegram_id`
//! - Create obligations (debts/credits)
//! - Apply payments with the clamped-subtraction balance rule
//! - Assemble a user's full state (obligations + embedded payments)
//!
//! ## Flow Example: Payment
//!
//! ```text
//! 1. Client posts payment via API
//!                ↓
//! 2. LedgerService.record_payment() called
//!                ↓
//! 3. One store transaction: lock obligation,
//!    insert payment, clamp and update balance
//!                ↓
//! 4. Return new balance to the handler
//! ```

use tracing::error;

use crate::db::queries;
use crate::db::{Database, DatabaseError, ObligationRecord, UserRecord};
use crate::models::ObligationState;

/// Errors that can occur in ledger operations.
///
/// This is the closed error taxonomy of the service; the API layer maps
/// each variant to a fixed HTTP status (see `api::error`). Store causes
/// are logged server-side and never shown to clients.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A required request field is missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The referenced obligation does not exist.
    #[error("obligation not found: {0}")]
    ObligationNotFound(i64),

    /// A uniqueness constraint was violated.
    #[error("conflicting record: {0}")]
    Conflict(String),

    /// The underlying store failed. Deliberately opaque toward clients.
    #[error("store operation failed")]
    Store(#[source] DatabaseError),
}

impl From<DatabaseError> for LedgerError {
    fn from(err: DatabaseError) -> Self {
        // SQLSTATE 23505 = unique_violation
        if let DatabaseError::QueryError(pg) = &err {
            if let Some(db_err) = pg.as_db_error() {
                if db_err.code() == &tokio_postgres::error::SqlState::UNIQUE_VIOLATION {
                    return LedgerError::Conflict(db_err.message().to_string());
                }
            }
        }
        error!("Store failure: {}", err);
        LedgerError::Store(err)
    }
}

/// The main service for ledger operations.
///
/// Holds the injected database handle; handlers receive the service
/// through application state, so tests can construct it against any
/// store.
///
/// ## Usage
///
/// ```rust,ignore
/// let ledger = LedgerService::new(db);
/// let user = ledger.authenticate("12345").await?;
/// let state = ledger.get_state(user.id).await?;
/// ```
#[derive(Clone)]
pub struct LedgerService {
    /// Database connection for ledger state.
    db: Database,
}

impl LedgerService {
    /// Create a new LedgerService instance.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Authenticate-or-register a user by external telegram id.
    ///
    /// Returns the existing user row when the identifier is known,
    /// otherwise creates one. Idempotent for a given `telegram_id`:
    /// the unique constraint plus upsert make concurrent first calls
    /// converge on the same row.
    ///
    /// ## Errors
    ///
    /// * `MissingField` - `telegram_id` is blank (nothing is written)
    /// * `Store` - the store call failed
    pub async fn authenticate(&self, telegram_id: &str) -> Result<UserRecord, LedgerError> {
        if telegram_id.trim().is_empty() {
            return Err(LedgerError::MissingField("telegram_id"));
        }

        if let Some(user) = queries::get_user_by_telegram_id(self.db.pool(), telegram_id).await? {
            return Ok(user);
        }

        let user = queries::upsert_user(self.db.pool(), telegram_id).await?;
        Ok(user)
    }

    /// Create an obligation for a user.
    ///
    /// The created row satisfies `initial_amount == current_amount ==
    /// amount`. No range validation is performed on `amount`.
    pub async fn create_obligation(
        &self,
        user_id: i64,
        obligation_type: &str,
        name: &str,
        amount: i64,
    ) -> Result<ObligationRecord, LedgerError> {
        let obligation =
            queries::insert_obligation(self.db.pool(), user_id, obligation_type, name, amount)
                .await?;
        Ok(obligation)
    }

    /// Record a payment against an obligation.
    ///
    /// The payment insert and the balance update run in one store
    /// transaction, so a recorded payment always has its balance effect
    /// and the log can never drift from `current_amount`.
    ///
    /// ## Returns
    ///
    /// The obligation's new `current_amount`, clamped at zero.
    ///
    /// ## Errors
    ///
    /// * `ObligationNotFound` - no such obligation; nothing was written
    /// * `Store` - the store transaction failed and rolled back
    pub async fn record_payment(
        &self,
        obligation_id: i64,
        amount: i64,
    ) -> Result<i64, LedgerError> {
        match queries::apply_payment(self.db.pool(), obligation_id, amount).await? {
            Some(new_current) => Ok(new_current),
            None => Err(LedgerError::ObligationNotFound(obligation_id)),
        }
    }

    /// Get the full state for a user: every obligation with its ordered
    /// payment history embedded.
    ///
    /// A user with no obligations yields an empty collection, not an
    /// error.
    pub async fn get_state(&self, user_id: i64) -> Result<Vec<ObligationState>, LedgerError> {
        let obligations = queries::get_obligations_by_user(self.db.pool(), user_id).await?;

        let obligation_ids: Vec<i64> = obligations.iter().map(|o| o.id).collect();
        let payments =
            queries::get_payments_by_obligations(self.db.pool(), &obligation_ids).await?;

        // Group payments under their obligation, preserving query order
        let mut state: Vec<ObligationState> = obligations
            .into_iter()
            .map(|obligation| ObligationState {
                obligation,
                payments: Vec::new(),
            })
            .collect();

        for payment in payments {
            if let Some(entry) = state
                .iter_mut()
                .find(|s| s.obligation.id == payment.obligation_id)
            {
                entry.payments.push(payment);
            }
        }

        Ok(state)
    }
}

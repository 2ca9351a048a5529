//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs a specific database operation.
//!
//! ## Query Organization
//!
//! Queries are grouped by the table they operate on:
//! - `user_*` / `upsert_user` - Users table operations
//! - `insert_obligation` / `get_obligations_*` - Obligations table operations
//! - `apply_payment` / `get_payments_*` - Payments table operations
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Row absence is expressed
//! through `Option` in the return type, not through an error.

use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::{debug, info};

use super::models::*;
use super::DatabaseError;
use crate::utils::clamped_subtract;

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Helper to convert a database row to UserRecord
fn row_to_user(row: &Row) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        telegram_id: row.get("telegram_id"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to ObligationRecord
fn row_to_obligation(row: &Row) -> ObligationRecord {
    ObligationRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        obligation_type: row.get("type"),
        name: row.get("name"),
        initial_amount: row.get("initial_amount"),
        current_amount: row.get("current_amount"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to PaymentRecord
fn row_to_payment(row: &Row) -> PaymentRecord {
    PaymentRecord {
        id: row.get("id"),
        obligation_id: row.get("obligation_id"),
        amount: row.get("amount"),
        created_at: row.get("created_at"),
    }
}

// ============================================
// USER QUERIES
// ============================================

/// Get a user by external telegram id.
pub async fn get_user_by_telegram_id(
    pool: &Pool,
    telegram_id: &str,
) -> Result<Option<UserRecord>, DatabaseError> {
    debug!("Fetching user for telegram_id: {}", telegram_id);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client
        .query_opt(
            r#"
            SELECT id, telegram_id, created_at
            FROM users
            WHERE telegram_id = $1
            "#,
            &[&telegram_id],
        )
        .await?;

    Ok(row.map(|r| row_to_user(&r)))
}

/// Insert a user, converging on the existing row if another request
/// registered the same telegram id first.
///
/// The no-op `DO UPDATE` makes `RETURNING` yield a row in both the
/// insert and the conflict case, so concurrent first calls for the
/// same identifier all see the same record.
pub async fn upsert_user(pool: &Pool, telegram_id: &str) -> Result<UserRecord, DatabaseError> {
    debug!("Registering user for telegram_id: {}", telegram_id);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client
        .query_one(
            r#"
            INSERT INTO users (telegram_id)
            VALUES ($1)
            ON CONFLICT (telegram_id)
            DO UPDATE SET telegram_id = EXCLUDED.telegram_id
            RETURNING id, telegram_id, created_at
            "#,
            &[&telegram_id],
        )
        .await?;

    let user = row_to_user(&row);
    info!("User registered: id={} telegram_id={}", user.id, user.telegram_id);
    Ok(user)
}

// ============================================
// OBLIGATION QUERIES
// ============================================

/// Create a new obligation with `initial_amount = current_amount = amount`.
pub async fn insert_obligation(
    pool: &Pool,
    user_id: i64,
    obligation_type: &str,
    name: &str,
    amount: i64,
) -> Result<ObligationRecord, DatabaseError> {
    debug!("Creating obligation '{}' for user: {}", name, user_id);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client
        .query_one(
            r#"
            INSERT INTO obligations (user_id, "type", name, initial_amount, current_amount)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, user_id, "type", name, initial_amount, current_amount, created_at
            "#,
            &[&user_id, &obligation_type, &name, &amount],
        )
        .await?;

    let obligation = row_to_obligation(&row);
    info!(
        "Obligation created: id={} user={} amount={}",
        obligation.id, obligation.user_id, obligation.initial_amount
    );
    Ok(obligation)
}

/// Get all obligations belonging to a user.
pub async fn get_obligations_by_user(
    pool: &Pool,
    user_id: i64,
) -> Result<Vec<ObligationRecord>, DatabaseError> {
    debug!("Fetching obligations for user: {}", user_id);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            SELECT id, user_id, "type", name, initial_amount, current_amount, created_at
            FROM obligations
            WHERE user_id = $1
            ORDER BY id
            "#,
            &[&user_id],
        )
        .await?;

    Ok(rows.iter().map(row_to_obligation).collect())
}

// ============================================
// PAYMENT QUERIES
// ============================================

/// Apply a payment to an obligation.
///
/// Runs in a single transaction so the payment log and the running
/// balance can never drift apart:
///
/// 1. Lock and read the obligation row (`FOR UPDATE`)
/// 2. Insert the payment row
/// 3. Update `current_amount` to `max(0, current - amount)`
///
/// The row lock serializes concurrent payments against the same
/// obligation, so each one sees the balance the previous one wrote.
///
/// ## Returns
///
/// * `Ok(Some(new_current))` - Payment recorded, balance updated
/// * `Ok(None)` - No such obligation; nothing was written
/// * `Err(DatabaseError)` - A step failed; the transaction rolled back
pub async fn apply_payment(
    pool: &Pool,
    obligation_id: i64,
    amount: i64,
) -> Result<Option<i64>, DatabaseError> {
    debug!(
        "Applying payment of {} to obligation: {}",
        amount, obligation_id
    );

    let mut client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let tx = client.transaction().await?;

    let row = tx
        .query_opt(
            r#"
            SELECT current_amount
            FROM obligations
            WHERE id = $1
            FOR UPDATE
            "#,
            &[&obligation_id],
        )
        .await?;

    let Some(row) = row else {
        // Dropping the transaction rolls it back
        return Ok(None);
    };

    let current_amount: i64 = row.get("current_amount");
    let new_current = clamped_subtract(current_amount, amount);

    tx.execute(
        r#"
        INSERT INTO payments (obligation_id, amount)
        VALUES ($1, $2)
        "#,
        &[&obligation_id, &amount],
    )
    .await?;

    tx.execute(
        r#"
        UPDATE obligations
        SET current_amount = $2
        WHERE id = $1
        "#,
        &[&obligation_id, &new_current],
    )
    .await?;

    tx.commit().await?;

    info!(
        "Payment applied: obligation={} amount={} balance {} -> {}",
        obligation_id, amount, current_amount, new_current
    );
    Ok(Some(new_current))
}

/// Get all payments for a set of obligations, ordered by insertion.
///
/// Used by the state query to attach each obligation's payment history
/// in one round trip instead of one query per obligation.
pub async fn get_payments_by_obligations(
    pool: &Pool,
    obligation_ids: &[i64],
) -> Result<Vec<PaymentRecord>, DatabaseError> {
    if obligation_ids.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Fetching payments for {} obligations", obligation_ids.len());

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            SELECT id, obligation_id, amount, created_at
            FROM payments
            WHERE obligation_id = ANY($1)
            ORDER BY obligation_id, id
            "#,
            &[&obligation_ids],
        )
        .await?;

    Ok(rows.iter().map(row_to_payment).collect())
}

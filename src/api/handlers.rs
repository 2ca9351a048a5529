//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts request data
//! 2. Calls the ledger service
//! 3. Returns a formatted response
//!
//! ## Error Handling
//!
//! Handlers return `Result<HttpResponse, LedgerError>`; the
//! `ResponseError` impl in `api::error` turns every failure into its
//! fixed status and structured JSON body, so no per-endpoint error
//! matching is needed.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::models::{AuthRequest, CreateObligationRequest, HealthResponse, PaymentAck,
    RecordPaymentRequest};
use crate::services::LedgerError;
use crate::AppState;

/// Service info endpoint (root).
///
/// ## Endpoint
///
/// `GET /`
///
/// ## Response
///
/// ```json
/// { "status": "ok", "service": "obligation-ledger" }
/// ```
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "obligation-ledger",
    }))
}

/// Health check endpoint.
///
/// Check if the backend is running and can reach the database.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:8080/health
/// ```
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "database": true,
///     "version": "0.1.0",
///     "timestamp": "2025-01-01T12:00:00Z"
/// }
/// ```
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    // Check database
    let db_healthy = state.db.pool().get().await.is_ok();

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if db_healthy {
        actix_web::http::StatusCode::OK
    } else {
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(response)
}

/// Authenticate or register a user.
///
/// Looks up the user by `telegram_id`, creating the row on first
/// contact. Identity is accepted at face value from the request body;
/// there is no password or token verification.
///
/// ## Endpoint
///
/// `POST /auth`
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/auth \
///   -H "Content-Type: application/json" \
///   -d '{ "telegram_id": "123456789" }'
/// ```
///
/// ## Response
///
/// The user row, whether found or newly created:
///
/// ```json
/// {
///     "id": 1,
///     "telegram_id": "123456789",
///     "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// ## Errors
///
/// - `VALIDATION_ERROR` (400) - `telegram_id` missing or blank;
///   nothing is written to the store
/// - `STORE_ERROR` (500) - the store call failed
pub async fn auth(
    state: web::Data<Arc<AppState>>,
    body: web::Json<AuthRequest>,
) -> Result<HttpResponse, LedgerError> {
    let telegram_id = body.telegram_id.as_deref().unwrap_or("");
    info!("Auth request for telegram_id: {}", telegram_id);

    let user = state.ledger.authenticate(telegram_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Create a new obligation.
///
/// Inserts one obligation row with `initial_amount = current_amount =
/// amount`. No range validation on `amount`.
///
/// ## Endpoint
///
/// `POST /obligation`
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/obligation \
///   -H "Content-Type: application/json" \
///   -d '{ "user_id": 1, "type": "debt", "name": "card", "amount": 1000 }'
/// ```
///
/// ## Response
///
/// The created row including its store-assigned id:
///
/// ```json
/// {
///     "id": 7,
///     "user_id": 1,
///     "type": "debt",
///     "name": "card",
///     "initial_amount": 1000,
///     "current_amount": 1000,
///     "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// ## Errors
///
/// - `STORE_ERROR` (500) - insert failed
pub async fn create_obligation(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateObligationRequest>,
) -> Result<HttpResponse, LedgerError> {
    info!(
        "Obligation request: user={} type={} name={} amount={}",
        body.user_id, body.obligation_type, body.name, body.amount
    );

    let request = body.into_inner();
    let obligation = state
        .ledger
        .create_obligation(
            request.user_id,
            &request.obligation_type,
            &request.name,
            request.amount,
        )
        .await?;

    Ok(HttpResponse::Ok().json(obligation))
}

/// Record a payment against an obligation.
///
/// The new balance is `max(0, current_amount - amount)`: overpayment
/// clamps to zero rather than going negative. The payment row and the
/// balance update are committed atomically.
///
/// ## Endpoint
///
/// `POST /payment`
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/payment \
///   -H "Content-Type: application/json" \
///   -d '{ "obligation_id": 7, "amount": 300 }'
/// ```
///
/// ## Response
///
/// ```json
/// { "success": true }
/// ```
///
/// ## Errors
///
/// - `NOT_FOUND` (404) - no such obligation; no payment is recorded
/// - `STORE_ERROR` (500) - the store transaction failed
pub async fn record_payment(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, LedgerError> {
    info!(
        "Payment request: obligation={} amount={}",
        body.obligation_id, body.amount
    );

    let new_current = state
        .ledger
        .record_payment(body.obligation_id, body.amount)
        .await?;

    info!(
        "Payment recorded: obligation={} new balance={}",
        body.obligation_id, new_current
    );

    Ok(HttpResponse::Ok().json(PaymentAck::ok()))
}

/// Get the full state for a user.
///
/// Returns every obligation belonging to the user, each with its
/// ordered payment history embedded. A user with no obligations gets
/// an empty array.
///
/// ## Endpoint
///
/// `GET /state/{user_id}`
///
/// ```bash
/// curl http://127.0.0.1:8080/state/1
/// ```
///
/// ## Response
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
///
/// ## Errors
///
/// - `STORE_ERROR` (500) - query failed
pub async fn get_state(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LedgerError> {
    let user_id = path.into_inner();
    info!("State request for user: {}", user_id);

    let obligations = state.ledger.get_state(user_id).await?;
    Ok(HttpResponse::Ok().json(obligations))
}

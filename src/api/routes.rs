//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::web;

use super::handlers;

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /                    GET  - Service info
/// ├── /health              GET  - Health check
/// ├── /auth                POST - Authenticate or register a user
/// ├── /obligation          POST - Create an obligation
/// ├── /payment             POST - Record a payment
/// └── /state/{user_id}     GET  - Full state for a user
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Root endpoint - service info
        .route("/", web::get().to(handlers::service_info))
        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))
        // Authenticate or register by telegram id
        .route("/auth", web::post().to(handlers::auth))
        // Create a debt/credit obligation
        .route("/obligation", web::post().to(handlers::create_obligation))
        // Record a payment against an obligation
        .route("/payment", web::post().to(handlers::record_payment))
        // Full state: obligations with embedded payments
        .route("/state/{user_id}", web::get().to(handlers::get_state));
}

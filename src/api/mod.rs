//! # REST API Module
//!
//! This module defines all HTTP endpoints for the Obligation Ledger API.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Service info |
//! | GET | `/health` | Health check |
//! | POST | `/auth` | Authenticate or register a user |
//! | POST | `/obligation` | Create an obligation |
//! | POST | `/payment` | Record a payment |
//! | GET | `/state/{user_id}` | Obligations with embedded payments |
//!
//! ## Request/Response Format
//!
//! Success responses return the affected row(s) directly as JSON.
//! Errors use a fixed status per kind and a structured body:
//!
//! ```json
//! {
//!     "error": {
//!         "code": "VALIDATION_ERROR",
//!         "message": "missing required field: telegram_id"
//!     }
//! }
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::configure_routes;

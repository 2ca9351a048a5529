//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models to allow API-specific shapes.
//!
//! ## Organization
//!
//! - `requests.rs` - Incoming request bodies
//! - `responses.rs` - Outgoing response bodies
//!
//! ## Serialization
//!
//! All models use Serde for JSON serialization/deserialization with
//! snake_case field names, matching the database rows the API returns
//! directly.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;

//! # API Error Mapping
//!
//! Maps the service's closed error taxonomy to HTTP responses. Each
//! `LedgerError` variant has a fixed status code and a stable error
//! code; clients never see raw store messages.
//!
//! ## Error Response Format
//!
//! ```json
//! {
//!     "error": {
//!         "code": "NOT_FOUND",
//!         "message": "obligation not found: 7"
//!     }
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::services::LedgerError;

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorDetail,
}

/// The structured error payload.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code.
    pub code: &'static str,

    /// Human-readable message. Store failures use a fixed message;
    /// the cause is logged server-side only.
    pub message: String,
}

/// Stable code for each error kind.
fn error_code(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::MissingField(_) => "VALIDATION_ERROR",
        LedgerError::ObligationNotFound(_) => "NOT_FOUND",
        LedgerError::Conflict(_) => "CONFLICT",
        LedgerError::Store(_) => "STORE_ERROR",
    }
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::MissingField(_) => StatusCode::BAD_REQUEST,
            LedgerError::ObligationNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Conflict(_) => StatusCode::CONFLICT,
            LedgerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: ErrorDetail {
                code: error_code(self),
                // Display of Store is the fixed opaque message
                message: self.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseError;

    #[test]
    fn test_status_codes_are_fixed_per_kind() {
        assert_eq!(
            LedgerError::MissingField("telegram_id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LedgerError::ObligationNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LedgerError::Conflict("duplicate".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LedgerError::Store(DatabaseError::ConnectionError("refused".to_string()))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_message_does_not_leak_cause() {
        let err = LedgerError::Store(DatabaseError::ConnectionError(
            "password authentication failed for user postgres".to_string(),
        ));
        let message = err.to_string();
        assert_eq!(message, "store operation failed");
        assert!(!message.contains("password"));
    }

    #[test]
    fn test_validation_message_names_the_field() {
        let err = LedgerError::MissingField("telegram_id");
        assert_eq!(err.to_string(), "missing required field: telegram_id");
        assert_eq!(error_code(&err), "VALIDATION_ERROR");
    }
}

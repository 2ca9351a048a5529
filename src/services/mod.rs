//! # Services Module
//!
//! This module contains the business logic for the Obligation Ledger
//! backend. The single service here orchestrates every store operation
//! the API exposes.
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `LedgerService` | User registration, obligations, payments, state |

pub mod ledger;

pub use ledger::{LedgerError, LedgerService};

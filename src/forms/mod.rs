//! Form definitions backing the admin routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod customers;
pub mod session;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid customer status")]
    InvalidStatus,

    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid order count")]
    InvalidOrderCount,
}

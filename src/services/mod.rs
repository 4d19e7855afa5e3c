//! Business services coordinating the backend repository and session views.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::services::export::ExportError;

pub mod api;
pub mod customers;
pub mod export;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("backend error: {0}")]
    Backend(String),

    #[error("form error: {0}")]
    Form(String),

    #[error("no customers to export")]
    EmptyExport,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Catalog key of the notification shown for this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            ServiceError::Unauthorized => "error_unauthorized",
            ServiceError::NotFound => "error_not_found",
            ServiceError::Backend(_) => "error_backend",
            ServiceError::Form(_) => "error_invalid_filter",
            ServiceError::EmptyExport => "error_nothing_to_export",
            ServiceError::Internal(_) => "error_internal",
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            other => ServiceError::Backend(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<ExportError> for ServiceError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Empty => ServiceError::EmptyExport,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

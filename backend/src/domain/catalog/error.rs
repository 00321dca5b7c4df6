//! Rejections raised by catalog operations.

use serde_json::json;

use super::{CatalogEntity, CatalogValidationError};
use crate::domain::Error;
use crate::domain::ports::CatalogPersistenceError;

/// Outcome of a rejected catalog operation.
///
/// `NotFound`, `NotOwner` and `ValidationFailed` are recoverable and leave
/// the store untouched; `Store` reports a persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{entity} {id} was not found")]
    NotFound { entity: CatalogEntity, id: i32 },
    #[error("{entity} {id} belongs to another user")]
    NotOwner { entity: CatalogEntity, id: i32 },
    #[error("{reason}")]
    ValidationFailed {
        field: &'static str,
        reason: CatalogValidationError,
    },
    #[error(transparent)]
    Store(#[from] CatalogPersistenceError),
}

impl CatalogError {
    pub fn not_found(entity: CatalogEntity, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn not_owner(entity: CatalogEntity, id: i32) -> Self {
        Self::NotOwner { entity, id }
    }
}

impl From<CatalogValidationError> for CatalogError {
    fn from(reason: CatalogValidationError) -> Self {
        Self::ValidationFailed {
            field: reason.field(),
            reason,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(value: CatalogError) -> Self {
        let message = value.to_string();
        match value {
            CatalogError::NotFound { entity, id } => Error::not_found(message)
                .with_details(json!({ "entity": entity.to_string(), "id": id })),
            CatalogError::NotOwner { entity, id } => Error::forbidden(message)
                .with_details(json!({ "entity": entity.to_string(), "id": id })),
            CatalogError::ValidationFailed { field, .. } => {
                Error::invalid_request(message).with_details(json!({ "field": field }))
            }
            CatalogError::Store(CatalogPersistenceError::Connection { message }) => {
                Error::service_unavailable(format!("catalog store unavailable: {message}"))
            }
            CatalogError::Store(CatalogPersistenceError::Query { message }) => {
                Error::internal(format!("catalog store error: {message}"))
            }
        }
    }
}

//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed catalog records and the rules applied to
//! them, independent of HTTP and storage. Types are immutable; mutations go
//! through the services, which enforce ownership before touching a port.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, ExternalIdentity: stored and externally asserted identities.
//! - Category, Item and their validated field types.
//! - Owned / is_owner: the ownership rule.
//! - CatalogService, IdentityService: implementations of the driving ports.

pub mod catalog;
pub mod error;
mod identity_service;
mod ownership;
pub mod ports;
mod trace_id;
pub mod user;

pub use self::catalog::{
    CatalogEntity, CatalogError, CatalogService, CatalogValidationError, Category, CategoryId,
    CategoryName, Item, ItemDescription, ItemDraft, ItemId, ItemName, ItemSubmission,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identity_service::IdentityService;
pub use self::ownership::{Owned, is_owner};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, ExternalIdentity, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use catalog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

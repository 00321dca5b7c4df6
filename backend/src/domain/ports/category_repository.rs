//! Port abstraction for category persistence.
//!
//! The repository applies no ownership checks; callers go through the
//! catalog service which enforces them before any write.
use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategoryName, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category and item repository adapters.
    pub enum CatalogPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "catalog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "catalog repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories owned by `owner`, ordered by name.
    async fn list_by_owner(&self, owner: UserId)
    -> Result<Vec<Category>, CatalogPersistenceError>;

    /// Every category, ordered by name.
    async fn list_all(&self) -> Result<Vec<Category>, CatalogPersistenceError>;

    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CatalogPersistenceError>;

    /// Insert a category owned by `owner`.
    async fn create(
        &self,
        name: &CategoryName,
        owner: UserId,
    ) -> Result<Category, CatalogPersistenceError>;

    /// Overwrite the category's name; the owner is never changed.
    async fn rename(
        &self,
        category: &Category,
        name: &CategoryName,
    ) -> Result<Category, CatalogPersistenceError>;

    /// Delete the category together with all of its items.
    ///
    /// Either everything is removed or nothing is. Returns the number of
    /// records removed (items plus the category itself).
    async fn delete(&self, category: &Category) -> Result<usize, CatalogPersistenceError>;
}

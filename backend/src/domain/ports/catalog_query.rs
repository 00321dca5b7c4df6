//! Driving port for catalog reads.
//!
//! Reads are not ownership-gated: any caller may view any record.

use async_trait::async_trait;

use crate::domain::{CatalogError, Category, CategoryId, Item, ItemId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn categories_owned_by(&self, owner: UserId) -> Result<Vec<Category>, CatalogError>;

    async fn all_categories(&self) -> Result<Vec<Category>, CatalogError>;

    async fn category(&self, id: CategoryId) -> Result<Option<Category>, CatalogError>;

    async fn items_in(&self, category: CategoryId) -> Result<Vec<Item>, CatalogError>;

    async fn item(&self, id: ItemId) -> Result<Option<Item>, CatalogError>;
}

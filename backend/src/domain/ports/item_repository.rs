//! Port abstraction for item persistence.
use async_trait::async_trait;

use crate::domain::{CategoryId, Item, ItemDraft, ItemId, UserId};

use super::CatalogPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Items filed under `category`, ordered by name.
    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Item>, CatalogPersistenceError>;

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogPersistenceError>;

    /// Insert an item owned by `owner`.
    async fn create(&self, draft: &ItemDraft, owner: UserId)
    -> Result<Item, CatalogPersistenceError>;

    /// Overwrite the item's fields; identity and owner are kept.
    async fn update(&self, item: &Item, draft: &ItemDraft)
    -> Result<Item, CatalogPersistenceError>;

    async fn delete(&self, item: &Item) -> Result<(), CatalogPersistenceError>;
}

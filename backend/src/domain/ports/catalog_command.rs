//! Driving port for catalog mutations.
//!
//! Every operation takes the acting user explicitly; the ownership rule is
//! applied by the implementation before anything is written.

use async_trait::async_trait;

use crate::domain::{
    CatalogError, Category, CategoryId, Item, ItemId, ItemSubmission, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a category, or rename `target` when given.
    async fn upsert_category(
        &self,
        name: &str,
        actor: UserId,
        target: Option<CategoryId>,
    ) -> Result<Category, CatalogError>;

    /// Create an item, or overwrite `target` when given.
    async fn upsert_item(
        &self,
        submission: &ItemSubmission,
        actor: UserId,
        target: Option<ItemId>,
    ) -> Result<Item, CatalogError>;

    /// Delete a category and its items; returns the number of records removed.
    async fn delete_category(&self, id: CategoryId, actor: UserId) -> Result<usize, CatalogError>;

    /// Delete an item. Deleting an absent item succeeds.
    async fn delete_item(&self, id: ItemId, actor: UserId) -> Result<(), CatalogError>;
}

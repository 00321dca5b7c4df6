//! Catalog service implementing the catalog driving ports.
//!
//! Every mutation resolves the target record first, applies the ownership
//! rule and only then calls the repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    CatalogEntity, CatalogError, Category, CategoryId, CategoryName, Item, ItemId,
    ItemSubmission,
};
use crate::domain::ports::{CatalogCommand, CatalogQuery, CategoryRepository, ItemRepository};
use crate::domain::{Owned, UserId, is_owner};

/// Catalog service over category and item repositories.
#[derive(Clone)]
pub struct CatalogService<C, I> {
    categories: Arc<C>,
    items: Arc<I>,
}

impl<C, I> CatalogService<C, I> {
    pub fn new(categories: Arc<C>, items: Arc<I>) -> Self {
        Self { categories, items }
    }
}

impl<C, I> CatalogService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    async fn require_category(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(CatalogEntity::Category, id.get()))
    }

    async fn require_item(&self, id: ItemId) -> Result<Item, CatalogError> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(CatalogEntity::Item, id.get()))
    }

    fn ensure_owner<R: Owned>(
        record: &R,
        entity: CatalogEntity,
        id: i32,
        actor: UserId,
    ) -> Result<(), CatalogError> {
        if is_owner(record, actor) {
            return Ok(());
        }
        warn!(%entity, id, actor = actor.get(), "ownership check failed");
        Err(CatalogError::not_owner(entity, id))
    }
}

#[async_trait]
impl<C, I> CatalogCommand for CatalogService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    async fn upsert_category(
        &self,
        name: &str,
        actor: UserId,
        target: Option<CategoryId>,
    ) -> Result<Category, CatalogError> {
        let name = CategoryName::new(name)?;
        let Some(id) = target else {
            let created = self.categories.create(&name, actor).await?;
            info!(category = created.id().get(), actor = actor.get(), "category created");
            return Ok(created);
        };

        let existing = self.require_category(id).await?;
        Self::ensure_owner(&existing, CatalogEntity::Category, id.get(), actor)?;
        let renamed = self.categories.rename(&existing, &name).await?;
        debug!(category = id.get(), "category renamed");
        Ok(renamed)
    }

    async fn upsert_item(
        &self,
        submission: &ItemSubmission,
        actor: UserId,
        target: Option<ItemId>,
    ) -> Result<Item, CatalogError> {
        let draft = submission.validate()?;
        self.require_category(draft.category_id).await?;

        let Some(id) = target else {
            let created = self.items.create(&draft, actor).await?;
            info!(item = created.id().get(), actor = actor.get(), "item created");
            return Ok(created);
        };

        let existing = self.require_item(id).await?;
        Self::ensure_owner(&existing, CatalogEntity::Item, id.get(), actor)?;
        let updated = self.items.update(&existing, &draft).await?;
        debug!(item = id.get(), "item updated");
        Ok(updated)
    }

    async fn delete_category(&self, id: CategoryId, actor: UserId) -> Result<usize, CatalogError> {
        let existing = self.require_category(id).await?;
        Self::ensure_owner(&existing, CatalogEntity::Category, id.get(), actor)?;
        let removed = self.categories.delete(&existing).await?;
        info!(category = id.get(), removed, "category deleted with its items");
        Ok(removed)
    }

    async fn delete_item(&self, id: ItemId, actor: UserId) -> Result<(), CatalogError> {
        let Some(existing) = self.items.find_by_id(id).await? else {
            debug!(item = id.get(), "item already absent; nothing to delete");
            return Ok(());
        };
        Self::ensure_owner(&existing, CatalogEntity::Item, id.get(), actor)?;
        self.items.delete(&existing).await?;
        info!(item = id.get(), "item deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, I> CatalogQuery for CatalogService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    async fn categories_owned_by(&self, owner: UserId) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list_by_owner(owner).await?)
    }

    async fn all_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list_all().await?)
    }

    async fn category(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        Ok(self.categories.find_by_id(id).await?)
    }

    async fn items_in(&self, category: CategoryId) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.list_by_category(category).await?)
    }

    async fn item(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
        Ok(self.items.find_by_id(id).await?)
    }
}

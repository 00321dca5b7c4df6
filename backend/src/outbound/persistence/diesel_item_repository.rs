//! SQLite-backed `ItemRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogPersistenceError, ItemRepository};
use crate::domain::{
    CatalogValidationError, CategoryId, Item, ItemDescription, ItemDraft, ItemId, ItemName, UserId,
};

use super::diesel_category_repository::{map_diesel_error, map_pool_error};
use super::models::{ItemRow, ItemUpdate, NewItemRow};
use super::pool::DbPool;
use super::schema::item;

/// Diesel-backed implementation of the `ItemRepository` port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: ItemRow) -> Result<Item, CatalogPersistenceError> {
    let invalid = |err: CatalogValidationError| {
        CatalogPersistenceError::query(format!("invalid item row: {err}"))
    };
    let draft = ItemDraft {
        name: ItemName::new(row.item_name).map_err(invalid)?,
        description: ItemDescription::new(row.item_description).map_err(invalid)?,
        category_id: CategoryId::new(row.category_id),
    };
    Ok(Item::new(
        ItemId::new(row.item_id),
        draft,
        UserId::new(row.user_id),
    ))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Item>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = item::table
            .filter(item::category_id.eq(category_id.get()))
            .order_by((item::item_name.asc(), item::item_id.asc()))
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = item::table
            .find(id.get())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn create(
        &self,
        draft: &ItemDraft,
        owner: UserId,
    ) -> Result<Item, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewItemRow {
            item_name: draft.name.as_str(),
            item_description: draft.description.as_str(),
            category_id: draft.category_id.get(),
            user_id: owner.get(),
        };

        let row: ItemRow = diesel::insert_into(item::table)
            .values(&new_row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_item(row)
    }

    async fn update(
        &self,
        existing: &Item,
        draft: &ItemDraft,
    ) -> Result<Item, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ItemUpdate {
            item_name: draft.name.as_str(),
            item_description: draft.description.as_str(),
            category_id: draft.category_id.get(),
        };

        let row: ItemRow = diesel::update(item::table.find(existing.id().get()))
            .set(&changes)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_item(row)
    }

    async fn delete(&self, existing: &Item) -> Result<(), CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(item::table.find(existing.id().get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

//! SQLite-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Deleting a category removes its items in the same transaction, so a
//! failure part way through leaves both tables as they were.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{CatalogPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId, CategoryName, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{category, item};

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) fn map_pool_error(error: PoolError) -> CatalogPersistenceError {
    map_basic_pool_error(error, CatalogPersistenceError::connection)
}

pub(super) fn map_diesel_error(error: diesel::result::Error) -> CatalogPersistenceError {
    map_basic_diesel_error(
        error,
        CatalogPersistenceError::query,
        CatalogPersistenceError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Result<Category, CatalogPersistenceError> {
    let name = CategoryName::new(row.category_name)
        .map_err(|err| CatalogPersistenceError::query(format!("invalid category row: {err}")))?;
    Ok(Category::new(
        CategoryId::new(row.category_id),
        name,
        UserId::new(row.user_id),
    ))
}

fn rows_to_categories(rows: Vec<CategoryRow>) -> Result<Vec<Category>, CatalogPersistenceError> {
    rows.into_iter().map(row_to_category).collect()
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Category>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = category::table
            .filter(category::user_id.eq(owner.get()))
            .order_by((category::category_name.asc(), category::category_id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_categories(rows)
    }

    async fn list_all(&self) -> Result<Vec<Category>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = category::table
            .order_by((category::category_name.asc(), category::category_id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_categories(rows)
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = category::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn create(
        &self,
        name: &CategoryName,
        owner: UserId,
    ) -> Result<Category, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCategoryRow {
            category_name: name.as_str(),
            user_id: owner.get(),
        };

        let row: CategoryRow = diesel::insert_into(category::table)
            .values(&new_row)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_category(row)
    }

    async fn rename(
        &self,
        existing: &Category,
        name: &CategoryName,
    ) -> Result<Category, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CategoryRow = diesel::update(category::table.find(existing.id().get()))
            .set(category::category_name.eq(name.as_str()))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_category(row)
    }

    async fn delete(&self, existing: &Category) -> Result<usize, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let category_id = existing.id().get();

        let (items_removed, categories_removed) = conn
            .transaction(move |conn| {
                async move {
                    let items_removed =
                        diesel::delete(item::table.filter(item::category_id.eq(category_id)))
                            .execute(conn)
                            .await?;
                    let categories_removed = diesel::delete(category::table.find(category_id))
                        .execute(conn)
                        .await?;
                    if categories_removed == 0 {
                        return Err(diesel::result::Error::NotFound);
                    }
                    Ok((items_removed, categories_removed))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(category_id, items_removed, "category delete committed");
        Ok(items_removed + categories_removed)
    }
}

//! Test doubles and fixtures for the repository ports.
//!
//! `InMemoryCatalogStore` implements the user, category and item
//! repositories over one mutex-guarded state so service and handler tests can
//! run without a database. Ordering and cascade semantics match the Diesel
//! adapters. `TempDatabase` provides a throwaway SQLite file with the schema
//! applied for adapter tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CatalogPersistenceError, CategoryRepository, ItemRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Category, CategoryId, CategoryName, Email, ExternalIdentity, Item, ItemDraft, ItemId, Owned,
    User, UserId,
};
use crate::outbound::persistence::{
    DbPool, PoolConfig, PoolError, SchemaBootstrapError, ensure_schema,
};

/// Failure while preparing a [`TempDatabase`].
#[derive(Debug, thiserror::Error)]
pub enum TempDatabaseError {
    #[error("failed to create temporary directory: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Schema(#[from] SchemaBootstrapError),
}

/// SQLite file in a temporary directory, schema applied.
///
/// The directory is removed when the value is dropped.
pub struct TempDatabase {
    _dir: tempfile::TempDir,
    pool: DbPool,
}

impl TempDatabase {
    pub async fn new() -> Result<Self, TempDatabaseError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy())).await?;
        ensure_schema(&pool).await?;
        Ok(Self { _dir: dir, pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Failure injected into every subsequent repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubFailure {
    Connection,
    Query,
}

impl StubFailure {
    fn catalog(self) -> CatalogPersistenceError {
        match self {
            Self::Connection => CatalogPersistenceError::connection("stub connection failure"),
            Self::Query => CatalogPersistenceError::query("stub query failure"),
        }
    }

    fn user(self) -> UserPersistenceError {
        match self {
            Self::Connection => UserPersistenceError::connection("stub connection failure"),
            Self::Query => UserPersistenceError::query("stub query failure"),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    categories: Vec<Category>,
    items: Vec<Item>,
    next_user: i32,
    next_category: i32,
    next_item: i32,
    failure: Option<StubFailure>,
}

impl StoreState {
    fn next(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn catalog_guard(&self) -> Result<(), CatalogPersistenceError> {
        self.failure.map_or(Ok(()), |failure| Err(failure.catalog()))
    }

    fn user_guard(&self) -> Result<(), UserPersistenceError> {
        self.failure.map_or(Ok(()), |failure| Err(failure.user()))
    }
}

/// Shared in-memory store implementing every repository port.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: Mutex<StoreState>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call fail with `failure`, or clear it with `None`.
    pub fn set_failure(&self, failure: Option<StubFailure>) {
        self.lock().failure = failure;
    }

    /// Number of categories currently stored.
    pub fn category_count(&self) -> usize {
        self.lock().categories.len()
    }

    /// Number of items currently stored.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    /// Number of users currently stored.
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A poisoned lock only follows a panicking test; keep serving its data.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn sorted<T>(records: impl Iterator<Item = T>, key: impl Fn(&T) -> (String, i32)) -> Vec<T> {
    let mut records: Vec<T> = records.collect();
    records.sort_by_key(key);
    records
}

#[async_trait]
impl UserRepository for InMemoryCatalogStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock();
        state.user_guard()?;
        Ok(state.users.iter().find(|user| user.email() == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock();
        state.user_guard()?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn create(&self, identity: &ExternalIdentity) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        state.user_guard()?;
        if state.users.iter().any(|user| user.email() == &identity.email) {
            return Err(UserPersistenceError::query(
                "UNIQUE constraint failed: user.email",
            ));
        }
        let id = UserId::new(StoreState::next(&mut state.next_user));
        let user = User::new(id, identity.clone());
        state.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Category>, CatalogPersistenceError> {
        let state = self.lock();
        state.catalog_guard()?;
        Ok(sorted(
            state
                .categories
                .iter()
                .filter(|category| category.owner() == owner)
                .cloned(),
            |category| (category.name().to_string(), category.id().get()),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Category>, CatalogPersistenceError> {
        let state = self.lock();
        state.catalog_guard()?;
        Ok(sorted(state.categories.iter().cloned(), |category| {
            (category.name().to_string(), category.id().get())
        }))
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CatalogPersistenceError> {
        let state = self.lock();
        state.catalog_guard()?;
        Ok(state
            .categories
            .iter()
            .find(|category| category.id() == id)
            .cloned())
    }

    async fn create(
        &self,
        name: &CategoryName,
        owner: UserId,
    ) -> Result<Category, CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        let id = CategoryId::new(StoreState::next(&mut state.next_category));
        let category = Category::new(id, name.clone(), owner);
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn rename(
        &self,
        category: &Category,
        name: &CategoryName,
    ) -> Result<Category, CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        let stored = state
            .categories
            .iter_mut()
            .find(|stored| stored.id() == category.id())
            .ok_or_else(|| CatalogPersistenceError::query("category row vanished"))?;
        *stored = stored.renamed(name.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, category: &Category) -> Result<usize, CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        let before = state.items.len() + state.categories.len();
        state
            .items
            .retain(|item| item.category_id() != category.id());
        state
            .categories
            .retain(|stored| stored.id() != category.id());
        Ok(before - state.items.len() - state.categories.len())
    }
}

#[async_trait]
impl ItemRepository for InMemoryCatalogStore {
    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Item>, CatalogPersistenceError> {
        let state = self.lock();
        state.catalog_guard()?;
        Ok(sorted(
            state
                .items
                .iter()
                .filter(|item| item.category_id() == category)
                .cloned(),
            |item| (item.name().to_string(), item.id().get()),
        ))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogPersistenceError> {
        let state = self.lock();
        state.catalog_guard()?;
        Ok(state.items.iter().find(|item| item.id() == id).cloned())
    }

    async fn create(
        &self,
        draft: &ItemDraft,
        owner: UserId,
    ) -> Result<Item, CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        let id = ItemId::new(StoreState::next(&mut state.next_item));
        let item = Item::new(id, draft.clone(), owner);
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        item: &Item,
        draft: &ItemDraft,
    ) -> Result<Item, CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        let stored = state
            .items
            .iter_mut()
            .find(|stored| stored.id() == item.id())
            .ok_or_else(|| CatalogPersistenceError::query("item row vanished"))?;
        *stored = stored.with_draft(draft.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, item: &Item) -> Result<(), CatalogPersistenceError> {
        let mut state = self.lock();
        state.catalog_guard()?;
        state.items.retain(|stored| stored.id() != item.id());
        Ok(())
    }
}

//! Behaviour tests for catalog ownership and cascade deletion.
//!
//! These scenarios drive the catalog and identity services over the
//! in-memory store and confirm that only owners change their records.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use catalog_backend::domain::ports::{CatalogCommand, CatalogQuery, UserIdentity};
use catalog_backend::domain::{
    CatalogError, CatalogService, Category, ExternalIdentity, IdentityService, ItemSubmission,
    User,
};
use catalog_backend::test_support::InMemoryCatalogStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct CatalogWorld {
    runtime: Runtime,
    store: Arc<InMemoryCatalogStore>,
    catalog: CatalogService<InMemoryCatalogStore, InMemoryCatalogStore>,
    identity: IdentityService<InMemoryCatalogStore>,
    users: RefCell<HashMap<String, User>>,
    categories: RefCell<HashMap<String, Category>>,
    last_error: RefCell<Option<CatalogError>>,
}

impl CatalogWorld {
    fn new() -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        Self {
            runtime: Runtime::new().expect("runtime"),
            catalog: CatalogService::new(store.clone(), store.clone()),
            identity: IdentityService::new(store.clone()),
            store,
            users: RefCell::new(HashMap::new()),
            categories: RefCell::new(HashMap::new()),
            last_error: RefCell::new(None),
        }
    }

    fn run<T>(&self, future: impl Future<Output = T>) -> T {
        self.runtime.block_on(future)
    }

    fn user(&self, name: &str) -> User {
        self.users
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("unknown user {name}"))
    }

    fn category(&self, name: &str) -> Category {
        self.categories
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("unknown category {name}"))
    }

    fn record<T>(&self, result: Result<T, CatalogError>) {
        *self.last_error.borrow_mut() = result.err();
    }
}

#[fixture]
fn world() -> CatalogWorld {
    CatalogWorld::new()
}

#[given("a user \"{name}\" signed in as \"{email}\"")]
fn a_user_signed_in(world: &CatalogWorld, name: String, email: String) {
    let identity = ExternalIdentity::try_from_parts(name.as_str(), &email, None)
        .expect("valid identity");
    let user = world
        .run(world.identity.resolve_or_create(&identity))
        .expect("resolve user");
    world.users.borrow_mut().insert(name, user);
}

#[given("\"{owner}\" owns the category \"{category}\"")]
fn owns_the_category(world: &CatalogWorld, owner: String, category: String) {
    let actor = world.user(&owner).id();
    let created = world
        .run(world.catalog.upsert_category(&category, actor, None))
        .expect("create category");
    world.categories.borrow_mut().insert(category, created);
}

#[when("\"{user}\" adds the item \"{item}\" to \"{category}\"")]
fn adds_an_item(world: &CatalogWorld, user: String, item: String, category: String) {
    let submission = ItemSubmission {
        name: item,
        description: "Sports kit".to_owned(),
        category_id: Some(world.category(&category).id()),
    };
    let actor = world.user(&user).id();
    let result = world.run(world.catalog.upsert_item(&submission, actor, None));
    world.record(result);
}

#[when("\"{user}\" renames \"{category}\" to \"{name}\"")]
fn renames_a_category(world: &CatalogWorld, user: String, category: String, name: String) {
    let target = world.category(&category).id();
    let actor = world.user(&user).id();
    let result = world.run(world.catalog.upsert_category(&name, actor, Some(target)));
    world.record(result);
}

#[when("\"{user}\" deletes the category \"{category}\"")]
fn deletes_a_category(world: &CatalogWorld, user: String, category: String) {
    let target = world.category(&category).id();
    let actor = world.user(&user).id();
    let result = world.run(world.catalog.delete_category(target, actor));
    world.record(result);
}

#[then("the change is rejected because \"{user}\" is not the owner")]
fn rejected_as_not_owner(world: &CatalogWorld, user: String) {
    let error = world.last_error.borrow().clone();
    assert!(
        matches!(error, Some(CatalogError::NotOwner { .. })),
        "expected {user} to be rejected, got {error:?}"
    );
}

#[then("the category \"{category}\" is still named \"{name}\"")]
fn category_is_named(world: &CatalogWorld, category: String, name: String) {
    let id = world.category(&category).id();
    let stored = world
        .run(world.catalog.category(id))
        .expect("query")
        .expect("category kept");
    assert_eq!(stored.name().as_str(), name);
}

#[then("the category \"{category}\" lists {count} items")]
fn category_lists_items(world: &CatalogWorld, category: String, count: usize) {
    let id = world.category(&category).id();
    let items = world.run(world.catalog.items_in(id)).expect("query");
    assert_eq!(items.len(), count);
}

#[then("the store holds {count} items")]
fn store_holds_items(world: &CatalogWorld, count: usize) {
    assert_eq!(world.store.item_count(), count);
}

#[then("the store holds {count} users")]
fn store_holds_users(world: &CatalogWorld, count: usize) {
    assert_eq!(world.store.user_count(), count);
}

#[then("\"{login}\" is stored as \"{name}\"")]
fn stored_as(world: &CatalogWorld, login: String, name: String) {
    assert_eq!(world.user(&login).name().as_str(), name);
}

#[scenario(
    path = "tests/features/catalog_ownership.feature",
    name = "An owner fills a category with items"
)]
fn an_owner_fills_a_category_with_items(world: CatalogWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalog_ownership.feature",
    name = "Another user cannot rename a category"
)]
fn another_user_cannot_rename_a_category(world: CatalogWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalog_ownership.feature",
    name = "Another user cannot delete a category"
)]
fn another_user_cannot_delete_a_category(world: CatalogWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalog_ownership.feature",
    name = "Deleting a category removes its items"
)]
fn deleting_a_category_removes_its_items(world: CatalogWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalog_ownership.feature",
    name = "Signing in twice reuses the stored user"
)]
fn signing_in_twice_reuses_the_stored_user(world: CatalogWorld) {
    drop(world);
}

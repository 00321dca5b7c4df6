use super::*;
use crate::domain::{Category, CategoryId, CategoryName, UserId};
use actix_rt::System;
use rstest::{fixture, rstest};

#[fixture]
fn soccer() -> Category {
    Category::new(
        CategoryId::new(10),
        CategoryName::new("Soccer").expect("valid name"),
        UserId::new(1),
    )
}

#[rstest]
#[case(
    CatalogPersistenceError::connection("pool exhausted"),
    "catalog repository connection failed: pool exhausted"
)]
#[case(
    CatalogPersistenceError::query("constraint"),
    "catalog repository query failed: constraint"
)]
fn catalog_errors_render_messages(#[case] error: CatalogPersistenceError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
#[case(
    UserPersistenceError::connection("refused"),
    "user repository connection failed: refused"
)]
#[case(UserPersistenceError::query("unique"), "user repository query failed: unique")]
fn user_errors_render_messages(#[case] error: UserPersistenceError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn identity_provider_errors_render_messages() {
    let error = IdentityProviderError::token_rejected("audience mismatch");
    assert_eq!(
        error.to_string(),
        "token verification failed: audience mismatch"
    );
}

#[rstest]
fn category_repository_mock_is_object_safe(soccer: Category) {
    let mut repo = MockCategoryRepository::new();
    let stored = soccer.clone();
    repo.expect_find_by_id()
        .withf(|id| *id == CategoryId::new(10))
        .return_once(move |_| Ok(Some(stored)));
    let repo: Box<dyn CategoryRepository> = Box::new(repo);

    System::new().block_on(async move {
        let found = repo.find_by_id(CategoryId::new(10)).await.expect("lookup");
        assert_eq!(found, Some(soccer));
    });
}

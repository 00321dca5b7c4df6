//! Tests for the item admin form.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::Value;

use super::{MISSING_FIELDS_MESSAGE, NOT_SAVED_MESSAGE, SAVED_FLASH};
use crate::domain::ports::{CatalogCommand, CatalogQuery};
use crate::domain::{CatalogService, Category, Item, ItemSubmission, UserId};
use crate::inbound::http::test_utils::{catalog_app, catalog_state, latest_cookie, location, log_in};
use crate::test_support::InMemoryCatalogStore;

type StoreCatalog = CatalogService<InMemoryCatalogStore, InMemoryCatalogStore>;

#[fixture]
fn store() -> Arc<InMemoryCatalogStore> {
    Arc::new(InMemoryCatalogStore::new())
}

fn service(store: &Arc<InMemoryCatalogStore>) -> StoreCatalog {
    CatalogService::new(store.clone(), store.clone())
}

async fn seed_category(store: &Arc<InMemoryCatalogStore>, name: &str, owner: i32) -> Category {
    service(store)
        .upsert_category(name, UserId::new(owner), None)
        .await
        .expect("category")
}

async fn seed_item(store: &Arc<InMemoryCatalogStore>, category: &Category, owner: i32) -> Item {
    let submission = ItemSubmission {
        name: "Ball".into(),
        description: "Round object".into(),
        category_id: Some(category.id()),
    };
    service(store)
        .upsert_item(&submission, UserId::new(owner), None)
        .await
        .expect("item")
}

#[rstest]
#[actix_web::test]
async fn creating_an_item_redirects_to_its_category(store: Arc<InMemoryCatalogStore>) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");
    let soccer = seed_category(&store, "Soccer", 1).await;
    let category_id = soccer.id().to_string();

    let req = test::TestRequest::post()
        .uri("/item/new")
        .cookie(cookie.clone())
        .set_form([
            ("name", "Ball"),
            ("description", "Round object"),
            ("category_id", category_id.as_str()),
            ("submit", "save"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(format!("/category/{category_id}")));
    let cookie = latest_cookie(cookie, &res);
    assert_eq!(store.item_count(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/category/{category_id}"))
        .cookie(cookie)
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"][0]["item_name"], "Ball");
    let flashes = page["flashes"].as_array().expect("flashes");
    assert!(flashes.iter().any(|f| f == SAVED_FLASH));
}

#[rstest]
#[case("Ball", "", "1")]
#[case("", "Round object", "1")]
#[case("Ball", "Round object", "")]
#[actix_web::test]
async fn incomplete_forms_are_re_rendered(
    store: Arc<InMemoryCatalogStore>,
    #[case] name: &str,
    #[case] description: &str,
    #[case] category_id: &str,
) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");
    seed_category(&store, "Soccer", 1).await;

    let req = test::TestRequest::post()
        .uri("/item/new")
        .cookie(cookie)
        .set_form([
            ("name", name),
            ("description", description),
            ("category_id", category_id),
            ("submit", "save"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let form: Value = test::read_body_json(res).await;
    assert_eq!(form["message"], MISSING_FIELDS_MESSAGE);
    assert_eq!(form["name"], name);
    assert_eq!(form["categories"][0]["category_name"], "Soccer");
    assert_eq!(store.item_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn non_owner_update_keeps_the_item(store: Arc<InMemoryCatalogStore>) {
    let app = catalog_app!(catalog_state(&store));
    let _owner = log_in!(&app, "Ada", "ada@example.com");
    let soccer = seed_category(&store, "Soccer", 1).await;
    let ball = seed_item(&store, &soccer, 1).await;
    let cookie = log_in!(&app, "Bob", "bob@example.com");
    let category_id = soccer.id().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/item/{}/edit", ball.id()))
        .cookie(cookie)
        .set_form([
            ("name", "Stolen"),
            ("description", "Mine now"),
            ("category_id", category_id.as_str()),
            ("submit", "save"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let form: Value = test::read_body_json(res).await;
    assert_eq!(form["message"], NOT_SAVED_MESSAGE);
    assert_eq!(form["name"], "Stolen");

    let stored = service(&store)
        .item(ball.id())
        .await
        .expect("query")
        .expect("item kept");
    assert_eq!(stored.name().as_str(), "Ball");
}

#[rstest]
#[actix_web::test]
async fn updating_a_missing_item_is_not_found(store: Arc<InMemoryCatalogStore>) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");
    let soccer = seed_category(&store, "Soccer", 1).await;
    let category_id = soccer.id().to_string();

    let req = test::TestRequest::post()
        .uri("/item/77/edit")
        .cookie(cookie)
        .set_form([
            ("name", "Ball"),
            ("description", "Round object"),
            ("category_id", category_id.as_str()),
            ("submit", "save"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let form: Value = test::read_body_json(res).await;
    assert_eq!(form["message"], NOT_SAVED_MESSAGE);
}

#[rstest]
#[case(true)]
#[case(false)]
#[actix_web::test]
async fn delete_returns_to_the_category(store: Arc<InMemoryCatalogStore>, #[case] present: bool) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");
    let soccer = seed_category(&store, "Soccer", 1).await;
    let target = if present {
        seed_item(&store, &soccer, 1).await.id().get()
    } else {
        99
    };
    let category_id = soccer.id().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/item/{target}/edit"))
        .cookie(cookie)
        .set_form([("category_id", category_id.as_str()), ("submit", "delete")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(format!("/category/{category_id}")));
    assert_eq!(store.item_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn delete_on_the_new_form_goes_home(store: Arc<InMemoryCatalogStore>) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");

    let req = test::TestRequest::post()
        .uri("/item/new")
        .cookie(cookie)
        .set_form([("submit", "delete")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/"));
}

#[rstest]
#[actix_web::test]
async fn forms_offer_only_the_users_categories(store: Arc<InMemoryCatalogStore>) {
    let app = catalog_app!(catalog_state(&store));
    let cookie = log_in!(&app, "Ada", "ada@example.com");
    let soccer = seed_category(&store, "Soccer", 1).await;
    seed_category(&store, "Archery", 2).await;
    let ball = seed_item(&store, &soccer, 1).await;

    let req = test::TestRequest::get()
        .uri(&format!("/item/{}/edit", ball.id()))
        .cookie(cookie)
        .to_request();
    let form: Value = test::call_and_read_body_json(&app, req).await;
    let categories = form["categories"].as_array().expect("categories");
    assert_eq!(categories.len(), 1);
    assert_eq!(form["name"], "Ball");
    assert_eq!(form["description"], "Round object");
    assert_eq!(form["category_id"], soccer.id().get());
}

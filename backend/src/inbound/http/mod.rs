//! HTTP inbound adapter exposing the catalog pages, the OAuth login flow and
//! the public JSON API.

pub mod auth;
pub mod categories;
pub mod current_user;
pub mod error;
pub mod health;
pub mod items;
pub mod json_api;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every catalog route.
///
/// JSON routes go first so `/category/{id}.json` is never taken for a page.
/// Callers add the session middleware and [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(json_api::categories_json)
        .service(json_api::category_json)
        .service(json_api::category_items_json)
        .service(auth::login_page)
        .service(auth::oauth_callback)
        .service(auth::oauth_disconnect)
        .service(categories::home)
        .service(categories::new_category_form)
        .service(categories::create_category)
        .service(categories::show_category)
        .service(categories::edit_category_form)
        .service(categories::update_category)
        .service(items::new_item_form)
        .service(items::create_item)
        .service(items::edit_item_form)
        .service(items::update_item);
}

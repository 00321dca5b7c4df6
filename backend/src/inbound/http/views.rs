//! JSON view models for the page and form surface.
//!
//! Each struct describes what a rendered page would show; handlers return
//! them as JSON bodies.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;

use crate::domain::{Category, Item, Owned, User};

use super::json_api::ItemJson;

/// Redirect with `303 See Other`, the status browsers follow with a GET.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().get(),
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            picture: user.picture().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummaryView {
    pub item_id: i32,
    pub item_name: String,
}

impl From<&Item> for ItemSummaryView {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id().get(),
            item_name: item.name().as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummaryView {
    pub category_id: i32,
    pub category_name: String,
    pub user_id: i32,
    pub owner_name: String,
    pub items: Vec<ItemSummaryView>,
}

impl CategorySummaryView {
    pub fn new(category: &Category, owner_name: &str, items: &[Item]) -> Self {
        Self {
            category_id: category.id().get(),
            category_name: category.name().as_str().to_owned(),
            user_id: category.owner().get(),
            owner_name: owner_name.to_owned(),
            items: items.iter().map(ItemSummaryView::from).collect(),
        }
    }
}

/// `GET /`: the current user's categories.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub user: UserView,
    pub categories: Vec<CategorySummaryView>,
    pub flashes: Vec<String>,
}

/// `GET /category/{id}`.
#[derive(Debug, Serialize)]
pub struct CategoryPageView {
    pub user: UserView,
    pub category_id: i32,
    pub category_name: String,
    pub user_id: i32,
    /// `None` when the owning user record is gone.
    pub owner_name: Option<String>,
    pub items: Vec<ItemJson>,
    pub can_edit: bool,
    pub flashes: Vec<String>,
}

/// Category create/edit form.
#[derive(Debug, Serialize)]
pub struct CategoryFormView {
    pub user: UserView,
    pub category_id: Option<i32>,
    pub category_name: String,
    pub message: Option<String>,
    pub flashes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub category_id: i32,
    pub category_name: String,
}

impl From<&Category> for CategoryOption {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.id().get(),
            category_name: category.name().as_str().to_owned(),
        }
    }
}

/// Item create/edit form with the drop-down of the user's categories.
#[derive(Debug, Serialize)]
pub struct ItemFormView {
    pub user: UserView,
    pub item_id: Option<i32>,
    pub categories: Vec<CategoryOption>,
    pub name: String,
    pub description: String,
    pub category_id: Option<i32>,
    pub message: Option<String>,
    pub flashes: Vec<String>,
}

/// `GET /login`.
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub state: String,
    pub client_id: String,
    pub flashes: Vec<String>,
}

/// Response to a successful OAuth callback.
#[derive(Debug, Serialize)]
pub struct WelcomeView {
    pub username: String,
    pub email: String,
    pub picture: Option<String>,
    pub user_id: i32,
}

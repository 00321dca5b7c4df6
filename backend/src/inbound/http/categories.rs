//! Category pages and the category admin form.
//!
//! ```text
//! GET  /                      current user's categories
//! GET  /category/{id}         one category with its items
//! GET  /category/new          empty form
//! POST /category/new          create (or abandon with submit=delete)
//! GET  /category/{id}/edit    prefilled form
//! POST /category/{id}/edit    rename, or cascade delete with submit=delete
//! ```

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{CatalogEntity, CatalogError, Category, CategoryId, Error, Owned, is_owner};

use super::ApiResult;
use super::current_user::CurrentUser;
use super::json_api::ItemJson;
use super::state::HttpState;
use super::views::{
    CategoryFormView, CategoryPageView, CategorySummaryView, HomeView, see_other,
};

pub(crate) const NOT_OWNER_FLASH: &str = "Action not allowed. User IDs must match.";
const MISSING_NAME_MESSAGE: &str = "Please provide a name for the category";

#[get("/")]
pub async fn home(state: web::Data<HttpState>, current: CurrentUser) -> ApiResult<HttpResponse> {
    let user = current.user();
    let categories = state.catalog_query.categories_owned_by(user.id()).await?;
    let mut summaries = Vec::with_capacity(categories.len());
    for category in &categories {
        let items = state.catalog_query.items_in(category.id()).await?;
        summaries.push(CategorySummaryView::new(category, user.name().as_str(), &items));
    }
    Ok(HttpResponse::Ok().json(HomeView {
        user: user.into(),
        categories: summaries,
        flashes: current.session().take_flashes(),
    }))
}

async fn require_category(state: &HttpState, id: CategoryId) -> ApiResult<Category> {
    state
        .catalog_query
        .category(id)
        .await?
        .ok_or_else(|| CatalogError::not_found(CatalogEntity::Category, id.get()).into())
}

#[get("/category/{id:\\d+}")]
pub async fn show_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let category = require_category(&state, CategoryId::new(path.into_inner())).await?;
    let owner_name = state
        .identity
        .user(category.owner())
        .await?
        .map(|owner| owner.name().as_str().to_owned());
    let items = state.catalog_query.items_in(category.id()).await?;
    Ok(HttpResponse::Ok().json(CategoryPageView {
        user: current.user().into(),
        category_id: category.id().get(),
        category_name: category.name().as_str().to_owned(),
        user_id: category.owner().get(),
        owner_name,
        items: items.iter().map(ItemJson::from).collect(),
        can_edit: is_owner(&category, current.id()),
        flashes: current.session().take_flashes(),
    }))
}

fn form_view(
    current: &CurrentUser,
    target: Option<&Category>,
    message: Option<&str>,
) -> CategoryFormView {
    CategoryFormView {
        user: current.user().into(),
        category_id: target.map(|category| category.id().get()),
        category_name: target
            .map(|category| category.name().as_str().to_owned())
            .unwrap_or_default(),
        message: message.map(str::to_owned),
        flashes: current.session().take_flashes(),
    }
}

#[get("/category/new")]
pub async fn new_category_form(current: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(form_view(&current, None, None))
}

#[get("/category/{id:\\d+}/edit")]
pub async fn edit_category_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let category = require_category(&state, CategoryId::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(form_view(&current, Some(&category), None)))
}

/// Fields posted by the category admin form.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub submit: Option<String>,
}

impl CategoryForm {
    fn wants_delete(&self) -> bool {
        self.submit.as_deref() == Some("delete")
    }
}

/// Turn a recoverable rejection into a flash and a redirect home.
fn reject(current: &CurrentUser, error: CatalogError) -> ApiResult<HttpResponse> {
    let flash = match error {
        CatalogError::NotOwner { .. } => NOT_OWNER_FLASH.to_owned(),
        CatalogError::NotFound { .. } => error.to_string(),
        CatalogError::ValidationFailed { .. } | CatalogError::Store(_) => {
            return Err(Error::from(error));
        }
    };
    current.session().push_flash(flash)?;
    Ok(see_other("/"))
}

async fn delete_category(
    state: &HttpState,
    current: &CurrentUser,
    target: Option<CategoryId>,
) -> ApiResult<HttpResponse> {
    let Some(id) = target else {
        return Ok(see_other("/"));
    };
    match state.catalog.delete_category(id, current.id()).await {
        Ok(removed) => {
            info!(category_id = id.get(), removed, "category deleted");
            Ok(see_other("/"))
        }
        Err(error) => reject(current, error),
    }
}

async fn save_category(
    state: &HttpState,
    current: &CurrentUser,
    form: &CategoryForm,
    target: Option<CategoryId>,
) -> ApiResult<HttpResponse> {
    match state
        .catalog
        .upsert_category(&form.category, current.id(), target)
        .await
    {
        Ok(category) => {
            current
                .session()
                .push_flash(format!("Category {} updated.", category.name().as_str()))?;
            Ok(see_other("/"))
        }
        Err(CatalogError::ValidationFailed { .. }) => {
            let mut view = form_view(current, None, Some(MISSING_NAME_MESSAGE));
            view.category_id = target.map(CategoryId::get);
            Ok(HttpResponse::build(StatusCode::BAD_REQUEST).json(view))
        }
        Err(error) => reject(current, error),
    }
}

async fn submit(
    state: &HttpState,
    current: &CurrentUser,
    form: &CategoryForm,
    target: Option<CategoryId>,
) -> ApiResult<HttpResponse> {
    if form.wants_delete() {
        delete_category(state, current, target).await
    } else {
        save_category(state, current, form, target).await
    }
}

#[post("/category/new")]
pub async fn create_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &current, &form, None).await
}

#[post("/category/{id:\\d+}/edit")]
pub async fn update_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<i32>,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &current, &form, Some(CategoryId::new(path.into_inner()))).await
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;

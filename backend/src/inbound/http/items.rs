//! Item admin form.
//!
//! ```text
//! GET  /item/new          empty form with the user's categories
//! POST /item/new          create (or abandon with submit=delete)
//! GET  /item/{id}/edit    prefilled form
//! POST /item/{id}/edit    overwrite, or delete with submit=delete
//! ```

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{CatalogEntity, CatalogError, CategoryId, Error, Item, ItemId, ItemSubmission};

use super::ApiResult;
use super::categories::NOT_OWNER_FLASH;
use super::current_user::CurrentUser;
use super::state::HttpState;
use super::views::{CategoryOption, ItemFormView, see_other};

const SAVED_FLASH: &str = "New Item Successfully Updated";
const MISSING_FIELDS_MESSAGE: &str = "Please provide a value in all fields";
const NOT_SAVED_MESSAGE: &str = "An Error Occurred, Item did not update or add";

/// Fields posted by the item admin form.
///
/// `category_id` arrives as text so an empty selection reads as missing
/// rather than failing the whole form.
#[derive(Debug, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub submit: Option<String>,
}

impl ItemForm {
    fn wants_delete(&self) -> bool {
        self.submit.as_deref() == Some("delete")
    }

    fn category(&self) -> Option<CategoryId> {
        self.category_id.trim().parse().ok().map(CategoryId::new)
    }

    fn submission(&self) -> ItemSubmission {
        ItemSubmission {
            name: self.name.clone(),
            description: self.description.clone(),
            category_id: self.category(),
        }
    }
}

/// Values shown in the form inputs.
struct FormValues {
    item_id: Option<ItemId>,
    name: String,
    description: String,
    category_id: Option<CategoryId>,
}

impl FormValues {
    fn blank() -> Self {
        Self {
            item_id: None,
            name: String::new(),
            description: String::new(),
            category_id: None,
        }
    }

    fn from_item(item: &Item) -> Self {
        Self {
            item_id: Some(item.id()),
            name: item.name().as_str().to_owned(),
            description: item.description().as_str().to_owned(),
            category_id: Some(item.category_id()),
        }
    }

    fn from_form(form: &ItemForm, target: Option<ItemId>) -> Self {
        Self {
            item_id: target,
            name: form.name.clone(),
            description: form.description.clone(),
            category_id: form.category(),
        }
    }
}

async fn form_view(
    state: &HttpState,
    current: &CurrentUser,
    values: FormValues,
    message: Option<&str>,
) -> ApiResult<ItemFormView> {
    let categories = state.catalog_query.categories_owned_by(current.id()).await?;
    Ok(ItemFormView {
        user: current.user().into(),
        item_id: values.item_id.map(ItemId::get),
        categories: categories.iter().map(CategoryOption::from).collect(),
        name: values.name,
        description: values.description,
        category_id: values.category_id.map(CategoryId::get),
        message: message.map(str::to_owned),
        flashes: current.session().take_flashes(),
    })
}

#[get("/item/new")]
pub async fn new_item_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
) -> ApiResult<HttpResponse> {
    let view = form_view(&state, &current, FormValues::blank(), None).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/item/{id:\\d+}/edit")]
pub async fn edit_item_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = ItemId::new(path.into_inner());
    let item = state
        .catalog_query
        .item(id)
        .await?
        .ok_or_else(|| Error::from(CatalogError::not_found(CatalogEntity::Item, id.get())))?;
    let view = form_view(&state, &current, FormValues::from_item(&item), None).await?;
    Ok(HttpResponse::Ok().json(view))
}

fn category_page(category: Option<CategoryId>) -> String {
    category.map_or_else(|| "/".to_owned(), |id| format!("/category/{id}"))
}

async fn delete_item(
    state: &HttpState,
    current: &CurrentUser,
    form: &ItemForm,
    target: Option<ItemId>,
) -> ApiResult<HttpResponse> {
    let Some(id) = target else {
        return Ok(see_other("/"));
    };
    let back = category_page(form.category());
    match state.catalog.delete_item(id, current.id()).await {
        Ok(()) => {
            info!(item_id = id.get(), "item deleted");
            Ok(see_other(&back))
        }
        Err(CatalogError::NotOwner { .. }) => {
            current.session().push_flash(NOT_OWNER_FLASH)?;
            Ok(see_other(&back))
        }
        Err(error) => Err(error.into()),
    }
}

async fn save_item(
    state: &HttpState,
    current: &CurrentUser,
    form: &ItemForm,
    target: Option<ItemId>,
) -> ApiResult<HttpResponse> {
    let (status, message) = match state
        .catalog
        .upsert_item(&form.submission(), current.id(), target)
        .await
    {
        Ok(item) => {
            current.session().push_flash(SAVED_FLASH)?;
            return Ok(see_other(&category_page(Some(item.category_id()))));
        }
        Err(CatalogError::ValidationFailed { .. }) => {
            (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
        }
        Err(CatalogError::NotOwner { .. }) => (StatusCode::FORBIDDEN, NOT_SAVED_MESSAGE),
        Err(CatalogError::NotFound { .. }) => (StatusCode::NOT_FOUND, NOT_SAVED_MESSAGE),
        Err(error @ CatalogError::Store(_)) => return Err(error.into()),
    };
    let values = FormValues::from_form(form, target);
    let view = form_view(state, current, values, Some(message)).await?;
    Ok(HttpResponse::build(status).json(view))
}

async fn submit(
    state: &HttpState,
    current: &CurrentUser,
    form: &ItemForm,
    target: Option<ItemId>,
) -> ApiResult<HttpResponse> {
    if form.wants_delete() {
        delete_item(state, current, form, target).await
    } else {
        save_item(state, current, form, target).await
    }
}

#[post("/item/new")]
pub async fn create_item(
    state: web::Data<HttpState>,
    current: CurrentUser,
    form: web::Form<ItemForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &current, &form, None).await
}

#[post("/item/{id:\\d+}/edit")]
pub async fn update_item(
    state: web::Data<HttpState>,
    current: CurrentUser,
    path: web::Path<i32>,
    form: web::Form<ItemForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &current, &form, Some(ItemId::new(path.into_inner()))).await
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;

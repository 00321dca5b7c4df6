//! Public read-only JSON API over the catalog.
//!
//! ```text
//! GET /category.json              {"categories":[{category_name, category_id, user_id}]}
//! GET /category/{id}.json         {"category":{category_name, category_id, user_id}}
//! GET /category/{id}/items.json   {"items":[{item_name, item_description, item_id}]}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::{CatalogEntity, CatalogError, Category, CategoryId, Item, Owned};

use super::ApiResult;
use super::state::HttpState;

/// Serialized category; `user_id` names the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryJson {
    pub category_name: String,
    pub category_id: i32,
    pub user_id: i32,
}

impl From<&Category> for CategoryJson {
    fn from(category: &Category) -> Self {
        Self {
            category_name: category.name().as_str().to_owned(),
            category_id: category.id().get(),
            user_id: category.owner().get(),
        }
    }
}

/// Serialized item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemJson {
    pub item_name: String,
    pub item_description: String,
    pub item_id: i32,
}

impl From<&Item> for ItemJson {
    fn from(item: &Item) -> Self {
        Self {
            item_name: item.name().as_str().to_owned(),
            item_description: item.description().as_str().to_owned(),
            item_id: item.id().get(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CategoriesEnvelope {
    categories: Vec<CategoryJson>,
}

#[derive(Debug, Serialize)]
struct CategoryEnvelope {
    category: CategoryJson,
}

#[derive(Debug, Serialize)]
struct ItemsEnvelope {
    items: Vec<ItemJson>,
}

/// Every category, ordered by name.
#[get("/category.json")]
pub async fn categories_json(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let categories = state.catalog_query.all_categories().await?;
    Ok(HttpResponse::Ok().json(CategoriesEnvelope {
        categories: categories.iter().map(CategoryJson::from).collect(),
    }))
}

/// One category, or 404.
#[get("/category/{id:\\d+}.json")]
pub async fn category_json(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    let category = state
        .catalog_query
        .category(id)
        .await?
        .ok_or_else(|| CatalogError::not_found(CatalogEntity::Category, id.get()))?;
    Ok(HttpResponse::Ok().json(CategoryEnvelope {
        category: CategoryJson::from(&category),
    }))
}

/// Items of a category, ordered by name. Unknown categories list nothing.
#[get("/category/{id:\\d+}/items.json")]
pub async fn category_items_json(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let items = state
        .catalog_query
        .items_in(CategoryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ItemsEnvelope {
        items: items.iter().map(ItemJson::from).collect(),
    }))
}

//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; repositories convert them into domain records.

use diesel::prelude::*;

use super::schema::{category, item, user};

/// Row struct for reading from the user table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user)]
pub(crate) struct NewUserRow<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub picture: Option<&'a str>,
}

/// Row struct for reading from the category table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = category)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CategoryRow {
    pub category_id: i32,
    pub category_name: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = category)]
pub(crate) struct NewCategoryRow<'a> {
    pub category_name: &'a str,
    pub user_id: i32,
}

/// Row struct for reading from the item table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = item)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ItemRow {
    pub item_id: i32,
    pub item_name: String,
    pub item_description: String,
    pub category_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = item)]
pub(crate) struct NewItemRow<'a> {
    pub item_name: &'a str,
    pub item_description: &'a str,
    pub category_id: i32,
    pub user_id: i32,
}

/// Changeset applied when an item is edited; the owner is never touched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = item)]
pub(crate) struct ItemUpdate<'a> {
    pub item_name: &'a str,
    pub item_description: &'a str,
    pub category_id: i32,
}

//! Diesel table definitions for the SQLite catalog schema.
//!
//! These must match the DDL issued by `schema_bootstrap`. Column names follow
//! the established `<table>_<field>` convention of the catalog database.

diesel::table! {
    /// Registered users; `email` is unique.
    user (user_id) {
        user_id -> Integer,
        user_name -> Text,
        email -> Text,
        picture -> Nullable<Text>,
    }
}

diesel::table! {
    /// Categories, each owned by one user.
    category (category_id) {
        category_id -> Integer,
        category_name -> Text,
        user_id -> Integer,
    }
}

diesel::table! {
    /// Items, filed under one category and owned by one user.
    item (item_id) {
        item_id -> Integer,
        item_name -> Text,
        item_description -> Text,
        category_id -> Integer,
        user_id -> Integer,
    }
}

diesel::joinable!(category -> user (user_id));
diesel::joinable!(item -> category (category_id));
diesel::joinable!(item -> user (user_id));

diesel::allow_tables_to_appear_in_same_query!(category, item, user);

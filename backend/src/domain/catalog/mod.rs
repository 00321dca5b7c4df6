//! Catalog aggregates: categories and the items filed under them.
//!
//! Names and descriptions are validated on construction so the service and
//! persistence layers never see blank values. Identifiers are assigned by the
//! store and wrapped to keep category, item and user keys apart.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Owned, UserId};

mod error;
mod service;

pub use self::error::CatalogError;
pub use self::service::CatalogService;


/// Validation failures for catalog field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("item name must not be empty")]
    EmptyItemName,
    #[error("item description must not be empty")]
    EmptyItemDescription,
    #[error("item category must be selected")]
    MissingCategory,
}

impl CatalogValidationError {
    /// Name of the offending form field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyCategoryName | Self::EmptyItemName => "name",
            Self::EmptyItemDescription => "description",
            Self::MissingCategory => "category",
        }
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id! {
    /// Store-assigned category identifier.
    CategoryId
}

catalog_id! {
    /// Store-assigned item identifier.
    ItemId
}

macro_rules! non_blank_text {
    ($(#[$meta:meta])* $name:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, CatalogValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(CatalogValidationError::$error);
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CatalogValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_blank_text! {
    /// Category display name; never blank.
    CategoryName, EmptyCategoryName
}

non_blank_text! {
    /// Item display name; never blank.
    ItemName, EmptyItemName
}

non_blank_text! {
    /// Free-text item description; never blank.
    ItemDescription, EmptyItemDescription
}

/// A named grouping of items owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    owner: UserId,
}

impl Category {
    pub fn new(id: CategoryId, name: CategoryName, owner: UserId) -> Self {
        Self { id, name, owner }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Return a copy carrying a new name.
    #[must_use]
    pub fn renamed(&self, name: CategoryName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }
}

impl Owned for Category {
    fn owner(&self) -> UserId {
        self.owner
    }
}

/// A catalog entry filed under exactly one category.
///
/// The item's owner is independent of the category's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: ItemName,
    description: ItemDescription,
    category_id: CategoryId,
    owner: UserId,
}

impl Item {
    pub fn new(id: ItemId, draft: ItemDraft, owner: UserId) -> Self {
        let ItemDraft {
            name,
            description,
            category_id,
        } = draft;
        Self {
            id,
            name,
            description,
            category_id,
            owner,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn description(&self) -> &ItemDescription {
        &self.description
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Return a copy with the draft's fields applied; identity and owner are kept.
    #[must_use]
    pub fn with_draft(&self, draft: ItemDraft) -> Self {
        Self::new(self.id, draft, self.owner)
    }
}

impl Owned for Item {
    fn owner(&self) -> UserId {
        self.owner
    }
}

/// Validated field set used to create or overwrite an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: ItemName,
    pub description: ItemDescription,
    pub category_id: CategoryId,
}

/// Raw item fields as submitted by a form, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl ItemSubmission {
    /// Validate every field, reporting the first failure in form order.
    ///
    /// # Examples
    /// ```
    /// use catalog_backend::domain::{CategoryId, ItemSubmission};
    ///
    /// let submission = ItemSubmission {
    ///     name: "Ball".into(),
    ///     description: "Round".into(),
    ///     category_id: Some(CategoryId::new(1)),
    /// };
    /// assert!(submission.validate().is_ok());
    /// assert!(ItemSubmission::default().validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ItemDraft, CatalogValidationError> {
        let name = ItemName::new(self.name.as_str())?;
        let description = ItemDescription::new(self.description.as_str())?;
        let category_id = self
            .category_id
            .ok_or(CatalogValidationError::MissingCategory)?;
        Ok(ItemDraft {
            name,
            description,
            category_id,
        })
    }
}

/// Kind of catalog record named in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntity {
    Category,
    Item,
}

impl fmt::Display for CatalogEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => f.write_str("category"),
            Self::Item => f.write_str("item"),
        }
    }
}

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_command;
mod catalog_query;
mod category_repository;
mod identity_provider;
mod item_repository;
mod user_identity;
mod user_repository;

#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::CatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CatalogPersistenceError, CategoryRepository};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FixtureIdentityProvider, IdentityProvider, IdentityProviderError, VerifiedIdentity,
};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::ItemRepository;
#[cfg(test)]
pub use user_identity::MockUserIdentity;
pub use user_identity::UserIdentity;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;

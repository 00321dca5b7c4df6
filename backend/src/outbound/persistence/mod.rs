//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by a single
//! SQLite file through `diesel-async` and a `bb8` pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records. Ownership rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   ports' persistence error enums.
//!
//! # Example
//!
//! ```no_run
//! use catalog_backend::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, ensure_schema,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("item_catalog.db")).await?;
//! ensure_schema(&pool).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_category_repository;
mod diesel_error_mapping;
mod diesel_item_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_bootstrap;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
pub use schema_bootstrap::{SchemaBootstrapError, ensure_schema};

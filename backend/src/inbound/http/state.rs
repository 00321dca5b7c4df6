//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogCommand, CatalogQuery, IdentityProvider, UserIdentity};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn UserIdentity>,
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn UserIdentity>,
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use catalog_backend::domain::ports::FixtureIdentityProvider;
    /// use catalog_backend::domain::{CatalogService, IdentityService};
    /// use catalog_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use catalog_backend::test_support::InMemoryCatalogStore;
    ///
    /// let store = Arc::new(InMemoryCatalogStore::new());
    /// let catalog = Arc::new(CatalogService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     identity: Arc::new(IdentityService::new(store)),
    ///     catalog: catalog.clone(),
    ///     catalog_query: catalog,
    ///     identity_provider: Arc::new(FixtureIdentityProvider),
    /// });
    /// let _query = state.catalog_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            catalog,
            catalog_query,
            identity_provider,
        } = ports;
        Self {
            identity,
            catalog,
            catalog_query,
            identity_provider,
        }
    }
}

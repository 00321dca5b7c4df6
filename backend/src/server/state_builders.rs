//! Builders for HTTP state ports.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::{info, warn};

use catalog_backend::config::OAuthClient;
use catalog_backend::domain::ports::{FixtureIdentityProvider, IdentityProvider};
use catalog_backend::domain::{CatalogService, IdentityService};
use catalog_backend::inbound::http::session_config::BuildMode;
use catalog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use catalog_backend::outbound::oauth::{
    GoogleEndpoints, GoogleIdentityProvider, GoogleOAuthSettings,
};
use catalog_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselItemRepository, DieselUserRepository,
};

const OAUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Select the identity provider.
///
/// Google is used whenever client credentials are configured. Without them
/// debug builds fall back to the fixture provider; release builds refuse to
/// start.
pub(crate) fn build_identity_provider(
    client: Option<OAuthClient>,
    mode: BuildMode,
) -> io::Result<Arc<dyn IdentityProvider>> {
    match (client, mode) {
        (Some(client), _) => {
            let endpoints = GoogleEndpoints::google()
                .map_err(|err| io::Error::other(format!("invalid Google endpoint: {err}")))?;
            let settings = GoogleOAuthSettings {
                client_id: client.client_id,
                client_secret: client.client_secret,
                redirect_uri: client.redirect_uri,
            };
            let provider = GoogleIdentityProvider::new(settings, endpoints, OAUTH_TIMEOUT)
                .map_err(|err| io::Error::other(format!("OAuth client setup failed: {err}")))?;
            info!("using Google identity provider");
            Ok(Arc::new(provider))
        }
        (None, BuildMode::Debug) => {
            warn!("no OAuth credentials configured; using fixture identity provider (dev only)");
            Ok(Arc::new(FixtureIdentityProvider))
        }
        (None, BuildMode::Release) => Err(io::Error::other(
            "OAuth credentials missing; set CATALOG_OAUTH_CLIENT_ID and CATALOG_OAUTH_CLIENT_SECRET",
        )),
    }
}

/// Build the shared HTTP state over the Diesel repositories.
pub(super) fn build_http_state(
    pool: &DbPool,
    identity_provider: Arc<dyn IdentityProvider>,
) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let categories = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let items = Arc::new(DieselItemRepository::new(pool.clone()));
    let catalog = Arc::new(CatalogService::new(categories, items));

    web::Data::new(HttpState::new(HttpStatePorts {
        identity: Arc::new(IdentityService::new(users)),
        catalog: catalog.clone(),
        catalog_query: catalog,
        identity_provider,
    }))
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;

use crate::domain::ports::FixtureIdentityProvider;
use crate::domain::{CatalogService, IdentityService};
use crate::test_support::InMemoryCatalogStore;

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation, the `session` cookie name and no
/// `Secure` flag so plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// The session cookie set by `response`, or `previous` when it left the
/// session untouched.
pub fn latest_cookie<B>(
    previous: Cookie<'static>,
    response: &ServiceResponse<B>,
) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map_or(previous, Cookie::into_owned)
}

pub fn location<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Handler state wired to real services over an in-memory store and the
/// fixture identity provider.
pub fn catalog_state(store: &Arc<InMemoryCatalogStore>) -> web::Data<HttpState> {
    let catalog = Arc::new(CatalogService::new(store.clone(), store.clone()));
    web::Data::new(HttpState::new(HttpStatePorts {
        identity: Arc::new(IdentityService::new(store.clone())),
        catalog: catalog.clone(),
        catalog_query: catalog,
        identity_provider: Arc::new(FixtureIdentityProvider),
    }))
}

/// Initialise a test service exposing every route behind a test session.
macro_rules! catalog_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .wrap($crate::inbound::http::test_utils::test_session_middleware())
                .configure($crate::inbound::http::configure),
        )
        .await
    };
}

/// Log in through `/login` and `/oauth/callback`; yields the session cookie.
macro_rules! log_in {
    ($app:expr, $name:expr, $email:expr) => {{
        let res = actix_web::test::call_service(
            $app,
            actix_web::test::TestRequest::get().uri("/login").to_request(),
        )
        .await;
        let cookie = $crate::inbound::http::test_utils::session_cookie(&res);
        let login: serde_json::Value = actix_web::test::read_body_json(res).await;
        let token = login["state"].as_str().expect("state token").to_owned();
        let req = actix_web::test::TestRequest::post()
            .uri(&format!("/oauth/callback?state={token}"))
            .cookie(cookie)
            .set_payload($crate::domain::ports::FixtureIdentityProvider::code_for($name, $email))
            .to_request();
        let res = actix_web::test::call_service($app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::OK, "login failed");
        $crate::inbound::http::test_utils::session_cookie(&res)
    }};
}

pub(crate) use {catalog_app, log_in};

//! OAuth login handlers.
//!
//! ```text
//! GET  /login                  issue the anti-forgery state token
//! POST /oauth/callback?state=  exchange the authorization code (raw body)
//! GET  /oauth/disconnect       revoke the access token and forget the identity
//! ```

use actix_web::{HttpResponse, get, post, web};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::Error;

use super::ApiResult;
use super::session::{SessionContext, SessionIdentity};
use super::state::HttpState;
use super::views::{LoginView, WelcomeView};

const STATE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const STATE_LEN: usize = 32;

/// Draw an anti-forgery token of upper-case letters and digits.
pub fn state_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let index = Uniform::from(0..STATE_ALPHABET.len());
    (0..STATE_LEN)
        .filter_map(|_| STATE_ALPHABET.get(index.sample(rng)).copied())
        .map(char::from)
        .collect()
}

#[get("/login")]
pub async fn login_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LoginView>> {
    let token = state_token(&mut rand::thread_rng());
    session.store_state_token(&token)?;
    Ok(web::Json(LoginView {
        state: token,
        client_id: state.identity_provider.client_id(),
        flashes: session.take_flashes(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub state: Option<String>,
}

fn check_state(session: &SessionContext, given: Option<&str>) -> ApiResult<()> {
    let expected = session.state_token()?;
    match (given, expected.as_deref()) {
        (Some(given), Some(expected)) if given == expected => Ok(()),
        _ => Err(Error::unauthorized("Invalid state parameter.")),
    }
}

/// Exchange the authorization code and log the resolved user in.
#[post("/oauth/callback")]
pub async fn oauth_callback(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CallbackQuery>,
    code: String,
) -> ApiResult<HttpResponse> {
    check_state(&session, query.state.as_deref())?;

    let verified = state.identity_provider.exchange_code(code.trim()).await?;
    let user = state.identity.resolve_or_create(&verified.profile).await?;

    if session
        .identity()
        .is_some_and(|current| current.external_id == verified.external_id)
    {
        return Ok(HttpResponse::Ok().json("Current user is already connected."));
    }

    let identity = SessionIdentity {
        access_token: verified.access_token,
        external_id: verified.external_id,
        username: verified.profile.name.as_str().to_owned(),
        email: verified.profile.email.as_str().to_owned(),
        picture: verified.profile.picture,
    };
    session.establish(&identity, user.id())?;
    session.push_flash(format!("you are now logged in as {}", identity.username))?;
    info!(user_id = user.id().get(), "user logged in");

    Ok(HttpResponse::Ok().json(WelcomeView {
        username: identity.username,
        email: identity.email,
        picture: identity.picture,
        user_id: user.id().get(),
    }))
}

/// Revoke the provider token and drop the session identity.
#[get("/oauth/disconnect")]
pub async fn oauth_disconnect(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(identity) = session.identity() else {
        return Err(Error::unauthorized("Current user not connected."));
    };
    state
        .identity_provider
        .revoke(&identity.access_token)
        .await
        .map_err(|error| {
            warn!(%error, "token revocation failed");
            Error::invalid_request("Failed to revoke token for given user.")
        })?;
    session.clear_identity();
    Ok(HttpResponse::Ok().json("Successfully disconnected."))
}

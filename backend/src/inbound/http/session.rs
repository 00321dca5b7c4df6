//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal with catalog concepts: the
//! anti-forgery state token, the externally verified identity, the resolved
//! user id and queued flash messages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const STATE_KEY: &str = "state";
pub(crate) const IDENTITY_KEY: &str = "identity";
pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "flashes";

/// Identity fields recorded after a successful external login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub access_token: String,
    pub external_id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the anti-forgery token issued with the login page.
    pub fn store_state_token(&self, token: &str) -> Result<(), Error> {
        self.0.insert(STATE_KEY, token).map_err(write_error)
    }

    pub fn state_token(&self) -> Result<Option<String>, Error> {
        self.0.get::<String>(STATE_KEY).map_err(read_error)
    }

    /// Record the verified identity and the user it resolved to.
    pub fn establish(&self, identity: &SessionIdentity, user_id: UserId) -> Result<(), Error> {
        self.0.insert(IDENTITY_KEY, identity).map_err(write_error)?;
        self.0.insert(USER_ID_KEY, user_id.get()).map_err(write_error)
    }

    /// Identity fields of the current login, if any.
    ///
    /// An unreadable entry is treated as logged out.
    pub fn identity(&self) -> Option<SessionIdentity> {
        match self.0.get::<SessionIdentity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding unreadable session identity");
                None
            }
        }
    }

    /// Drop identity fields and the user id; flashes and state survive.
    pub fn clear_identity(&self) {
        self.0.remove(IDENTITY_KEY);
        self.0.remove(USER_ID_KEY);
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::new),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Queue a message for the next page view.
    pub fn push_flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut flashes = self
            .0
            .get::<Vec<String>>(FLASHES_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        flashes.push(message.into());
        self.0.insert(FLASHES_KEY, flashes).map_err(write_error)
    }

    /// Drain queued messages.
    pub fn take_flashes(&self) -> Vec<String> {
        self.0
            .remove_as::<Vec<String>>(FLASHES_KEY)
            .and_then(Result::ok)
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

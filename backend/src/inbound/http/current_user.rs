//! Extractor for session-gated pages.
//!
//! `CurrentUser` resolves the user id stored in the session to a stored
//! [`User`]. Requests without one are redirected to `/login` with a flash.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{info, warn};

use crate::domain::{Error, User, UserId};

use super::session::SessionContext;
use super::state::HttpState;

pub(crate) const NOT_ALLOWED_FLASH: &str = "You are not allowed to access there";

/// Rejection returned when a gated page is requested without a login.
#[derive(Debug, thiserror::Error)]
#[error("login required")]
pub struct LoginRequired;

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

/// The logged-in user together with the session it came from.
pub struct CurrentUser {
    user: User,
    session: SessionContext,
}

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn id(&self) -> UserId {
        self.user.id()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

fn deny(session: &SessionContext) -> actix_web::Error {
    if let Err(error) = session.push_flash(NOT_ALLOWED_FLASH) {
        warn!(%error, "could not queue login flash");
    }
    LoginRequired.into()
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let Some(user_id) = session.user_id() else {
                return Err(deny(&session));
            };
            match state.identity.user(user_id).await? {
                Some(user) => Ok(Self { user, session }),
                None => {
                    info!(user_id = user_id.get(), "session refers to an unknown user");
                    session.clear_identity();
                    Err(deny(&session))
                }
            }
        })
    }
}

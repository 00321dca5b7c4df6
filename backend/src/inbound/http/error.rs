//! HTTP adapter mapping for domain errors.
//!
//! Domain errors stay transport agnostic; this module turns them into JSON
//! bodies with a status code, the `trace-id` header and redaction of
//! internal failures.

use actix_web::http::header::{CACHE_CONTROL, CacheControl, CacheDirective};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::ports::IdentityProviderError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload sent to clients; internal failures lose their message and details.
fn client_payload(error: &Error) -> Error {
    if !matches!(error.code(), ErrorCode::InternalError) {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header((CACHE_CONTROL, CacheControl(vec![CacheDirective::NoStore])));
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// Every provider failure is an authentication failure from the client's view.
impl From<IdentityProviderError> for Error {
    fn from(err: IdentityProviderError) -> Self {
        warn!(error = %err, "external authentication failed");
        let message = match err {
            IdentityProviderError::CodeExchange { .. } => {
                "Failed to upgrade the authorization code.".to_owned()
            }
            IdentityProviderError::TokenRejected { message } => message,
            IdentityProviderError::Transport { .. } => "Identity provider unreachable.".to_owned(),
            IdentityProviderError::Revocation { .. } => {
                "Failed to revoke token for given user.".to_owned()
            }
        };
        Error::unauthorized(message)
    }
}

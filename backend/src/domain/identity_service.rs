//! Identity adapter resolving external logins to stored users.
//!
//! The email address is the natural key. A user seen for the first time is
//! created from the provider's profile; a returning user is handed back
//! exactly as stored, even when the provider now reports a different name
//! or picture.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserIdentity, UserPersistenceError, UserRepository};
use crate::domain::{Error, ExternalIdentity, User, UserId};

/// Identity service implementing [`UserIdentity`].
#[derive(Clone)]
pub struct IdentityService<U> {
    users: Arc<U>,
}

impl<U> IdentityService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

#[async_trait]
impl<U> UserIdentity for IdentityService<U>
where
    U: UserRepository,
{
    async fn resolve_or_create(&self, identity: &ExternalIdentity) -> Result<User, Error> {
        if let Some(existing) = self
            .users
            .find_by_email(&identity.email)
            .await
            .map_err(map_user_error)?
        {
            return Ok(existing);
        }

        let created = self
            .users
            .create(identity)
            .await
            .map_err(map_user_error)?;
        info!(user = created.id().get(), "registered user on first login");
        Ok(created)
    }

    async fn user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

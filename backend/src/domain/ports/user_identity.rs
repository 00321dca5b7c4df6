//! Driving port mapping external identities onto stored users.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserIdentity: Send + Sync {
    /// Return the user registered under the identity's email, creating one on
    /// first sight. Existing users are returned unchanged.
    async fn resolve_or_create(&self, identity: &ExternalIdentity) -> Result<User, Error>;

    /// Fetch a stored user by id.
    async fn user(&self, id: UserId) -> Result<Option<User>, Error>;
}

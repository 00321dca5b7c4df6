//! Driven port for the external OAuth2 identity provider.
//!
//! The provider turns a one-time authorization code into a verified profile
//! and can later revoke the access token it issued. The domain trusts the
//! returned profile without re-deriving identity.

use async_trait::async_trait;

use crate::domain::ExternalIdentity;

use super::define_port_error;

define_port_error! {
    /// Failures reported by identity provider adapters.
    pub enum IdentityProviderError {
        /// The authorization code could not be exchanged for credentials.
        CodeExchange { message: String } => "failed to upgrade the authorization code: {message}",
        /// The issued token failed verification.
        TokenRejected { message: String } => "token verification failed: {message}",
        /// The provider could not be reached.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// Revoking the access token failed.
        Revocation { message: String } => "failed to revoke token: {message}",
    }
}

/// Credentials and profile obtained from a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-scoped subject identifier.
    pub external_id: String,
    pub access_token: String,
    pub profile: ExternalIdentity,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// OAuth client identifier shown on the login page.
    fn client_id(&self) -> String;

    /// Exchange an authorization code for a verified identity.
    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, IdentityProviderError>;

    /// Revoke a previously issued access token.
    async fn revoke(&self, access_token: &str) -> Result<(), IdentityProviderError>;
}

/// Deterministic provider for development and tests.
///
/// Accepts codes of the form `fixture:<name>:<email>` and issues the token
/// `token-<email>`. Only tokens it issued can be revoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    const CODE_PREFIX: &'static str = "fixture:";
    const TOKEN_PREFIX: &'static str = "token-";

    /// Build the authorization code that yields the given profile.
    pub fn code_for(name: &str, email: &str) -> String {
        format!("{}{name}:{email}", Self::CODE_PREFIX)
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    fn client_id(&self) -> String {
        "fixture-client".to_owned()
    }

    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, IdentityProviderError> {
        let (name, email) = code
            .trim()
            .strip_prefix(Self::CODE_PREFIX)
            .and_then(|rest| rest.split_once(':'))
            .ok_or_else(|| IdentityProviderError::code_exchange("unrecognised fixture code"))?;
        let profile = ExternalIdentity::try_from_parts(name, email, None)
            .map_err(|err| IdentityProviderError::token_rejected(err.to_string()))?;
        Ok(VerifiedIdentity {
            external_id: format!("fixture-{}", profile.email),
            access_token: format!("{}{}", Self::TOKEN_PREFIX, profile.email),
            profile,
        })
    }

    async fn revoke(&self, access_token: &str) -> Result<(), IdentityProviderError> {
        if access_token.starts_with(Self::TOKEN_PREFIX) {
            Ok(())
        } else {
            Err(IdentityProviderError::revocation("token was not issued here"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_exchanges_well_formed_codes() {
        let provider = FixtureIdentityProvider;
        let code = FixtureIdentityProvider::code_for("Ada", "ada@example.com");

        let verified = provider.exchange_code(&code).await.expect("exchange");

        assert_eq!(verified.profile.name.as_str(), "Ada");
        assert_eq!(verified.access_token, "token-ada@example.com");
        provider
            .revoke(&verified.access_token)
            .await
            .expect("revocable");
    }

    #[rstest]
    #[case("garbage")]
    #[case("fixture:no-email")]
    #[tokio::test]
    async fn fixture_rejects_unknown_codes(#[case] code: &str) {
        let result = FixtureIdentityProvider.exchange_code(code).await;
        assert!(matches!(result, Err(IdentityProviderError::CodeExchange { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_refuses_foreign_tokens() {
        let result = FixtureIdentityProvider.revoke("other").await;
        assert!(matches!(result, Err(IdentityProviderError::Revocation { .. })));
    }
}

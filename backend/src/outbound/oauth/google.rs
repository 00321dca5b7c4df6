//! Reqwest-backed Google identity provider.
//!
//! The adapter owns transport details only: the code exchange, token
//! verification against `tokeninfo`, the profile fetch and token revocation.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{IdTokenClaimsDto, TokenInfoDto, TokenResponseDto, UserInfoDto};
use crate::domain::ExternalIdentity;
use crate::domain::ports::{IdentityProvider, IdentityProviderError, VerifiedIdentity};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const TOKEN_INFO_URL: &str = "https://www.googleapis.com/oauth2/v1/tokeninfo";
const USER_INFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";
const REVOKE_URL: &str = "https://accounts.google.com/o/oauth2/revoke";

/// Endpoint set used by the adapter.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub token: Url,
    pub token_info: Url,
    pub user_info: Url,
    pub revoke: Url,
}

impl GoogleEndpoints {
    /// Google's production endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in URLs fail to parse.
    pub fn google() -> Result<Self, url::ParseError> {
        Ok(Self {
            token: Url::parse(TOKEN_URL)?,
            token_info: Url::parse(TOKEN_INFO_URL)?,
            user_info: Url::parse(USER_INFO_URL)?,
            revoke: Url::parse(REVOKE_URL)?,
        })
    }
}

/// OAuth client registration.
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Identity provider adapter performing HTTP calls against Google.
pub struct GoogleIdentityProvider {
    client: Client,
    endpoints: GoogleEndpoints,
    settings: GoogleOAuthSettings,
}

impl GoogleIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        settings: GoogleOAuthSettings,
        endpoints: GoogleEndpoints,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoints,
            settings,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        on_status: fn(String) -> IdentityProviderError,
    ) -> Result<T, IdentityProviderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), on_status));
        }
        decode(body.as_ref())
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn client_id(&self) -> String {
        self.settings.client_id.clone()
    }

    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoints.token.clone())
            .form(&[
                ("code", code.trim()),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(
                status,
                body.as_ref(),
                IdentityProviderError::code_exchange,
            ));
        }
        let tokens: TokenResponseDto = decode(body.as_ref())?;
        let subject = tokens
            .id_token
            .as_deref()
            .ok_or_else(|| IdentityProviderError::code_exchange("response carried no id token"))
            .and_then(id_token_subject)?;

        let info: TokenInfoDto = self
            .get_json(
                self.endpoints.token_info.clone(),
                &[("access_token", tokens.access_token.as_str())],
                IdentityProviderError::token_rejected,
            )
            .await?;
        verify_token_info(&info, &subject, &self.settings.client_id)?;

        let profile: UserInfoDto = self
            .get_json(
                self.endpoints.user_info.clone(),
                &[("access_token", tokens.access_token.as_str()), ("alt", "json")],
                IdentityProviderError::token_rejected,
            )
            .await?;
        let profile = ExternalIdentity::try_from_parts(
            profile.name,
            &profile.email,
            profile.picture.as_deref(),
        )
        .map_err(|err| IdentityProviderError::token_rejected(format!("incomplete profile: {err}")))?;

        debug!(subject = %subject, "identity verified");
        Ok(VerifiedIdentity {
            external_id: subject,
            access_token: tokens.access_token,
            profile,
        })
    }

    async fn revoke(&self, access_token: &str) -> Result<(), IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoints.revoke.clone())
            .query(&[("token", access_token)])
            .send()
            .await
            .map_err(|err| IdentityProviderError::revocation(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(
            status,
            body.as_ref(),
            IdentityProviderError::revocation,
        ))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, IdentityProviderError> {
    serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::token_rejected(format!("invalid provider JSON payload: {error}"))
    })
}

/// Read the `sub` claim from an unverified JWT payload.
///
/// The token arrives directly from the token endpoint over TLS; its claims
/// are cross-checked against `tokeninfo` afterwards.
fn id_token_subject(id_token: &str) -> Result<String, IdentityProviderError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| IdentityProviderError::token_rejected("malformed id token"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| IdentityProviderError::token_rejected(format!("id token payload: {err}")))?;
    let claims: IdTokenClaimsDto = serde_json::from_slice(&bytes)
        .map_err(|err| IdentityProviderError::token_rejected(format!("id token claims: {err}")))?;
    Ok(claims.sub)
}

/// Check that the access token belongs to `subject` and was issued to this client.
fn verify_token_info(
    info: &TokenInfoDto,
    subject: &str,
    client_id: &str,
) -> Result<(), IdentityProviderError> {
    if let Some(error) = info.error.as_deref() {
        return Err(IdentityProviderError::token_rejected(error));
    }
    if info.user_id.as_deref() != Some(subject) {
        return Err(IdentityProviderError::token_rejected(
            "Token's user ID doesn't match given user ID.",
        ));
    }
    if info.issued_to.as_deref() != Some(client_id) {
        return Err(IdentityProviderError::token_rejected(
            "Token's client ID does not match app's.",
        ));
    }
    Ok(())
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::transport(error.to_string())
}

fn map_status_error(
    status: StatusCode,
    body: &[u8],
    client_error: fn(String) -> IdentityProviderError,
) -> IdentityProviderError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    if status.is_client_error() {
        client_error(message)
    } else {
        IdentityProviderError::transport(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network verification helpers.

    use super::*;
    use rstest::rstest;

    fn info(user_id: Option<&str>, issued_to: Option<&str>, error: Option<&str>) -> TokenInfoDto {
        TokenInfoDto {
            user_id: user_id.map(str::to_owned),
            issued_to: issued_to.map(str::to_owned),
            error: error.map(str::to_owned),
        }
    }

    fn jwt(claims: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(claims))
    }

    #[rstest]
    fn accepts_matching_token_info() {
        let result = verify_token_info(&info(Some("42"), Some("client"), None), "42", "client");
        assert!(result.is_ok());
    }

    #[rstest]
    #[case::provider_error(info(Some("42"), Some("client"), Some("invalid_token")))]
    #[case::other_user(info(Some("7"), Some("client"), None))]
    #[case::other_client(info(Some("42"), Some("elsewhere"), None))]
    #[case::missing_fields(TokenInfoDto::default())]
    fn rejects_mismatched_token_info(#[case] info: TokenInfoDto) {
        let result = verify_token_info(&info, "42", "client");
        assert!(matches!(
            result,
            Err(IdentityProviderError::TokenRejected { .. })
        ));
    }

    #[rstest]
    fn reads_subject_from_id_token() {
        let subject = id_token_subject(&jwt(r#"{"sub":"1234","aud":"client"}"#))
            .expect("subject decodes");
        assert_eq!(subject, "1234");
    }

    #[rstest]
    #[case("no-dots")]
    #[case("a.!!!.c")]
    fn rejects_malformed_id_tokens(#[case] token: &str) {
        assert!(id_token_subject(token).is_err());
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, true)]
    #[case(StatusCode::UNAUTHORIZED, true)]
    #[case(StatusCode::BAD_GATEWAY, false)]
    fn client_statuses_use_the_supplied_variant(#[case] status: StatusCode, #[case] client: bool) {
        let error = map_status_error(status, b"{\"error\":\"invalid_grant\"}", |message| {
            IdentityProviderError::code_exchange(message)
        });
        assert_eq!(
            matches!(error, IdentityProviderError::CodeExchange { .. }),
            client
        );
    }

    #[rstest]
    fn default_endpoints_parse() {
        let endpoints = GoogleEndpoints::google().expect("urls parse");
        assert_eq!(endpoints.revoke.host_str(), Some("accounts.google.com"));
    }
}

//! DTOs for decoding Google OAuth2 responses.

use serde::Deserialize;

/// Response of the authorization-code exchange.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) id_token: Option<String>,
}

/// Claims read from the ID token payload.
#[derive(Debug, Deserialize)]
pub(super) struct IdTokenClaimsDto {
    pub(super) sub: String,
}

/// Response of the `tokeninfo` endpoint.
#[derive(Debug, Default, Deserialize)]
pub(super) struct TokenInfoDto {
    #[serde(default)]
    pub(super) user_id: Option<String>,
    #[serde(default)]
    pub(super) issued_to: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

/// Response of the `userinfo` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct UserInfoDto {
    pub(super) name: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) picture: Option<String>,
}

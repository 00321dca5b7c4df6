//! OAuth2 identity provider adapters.
//!
//! This module provides a reqwest implementation of the `IdentityProvider`
//! port against Google's OAuth2 endpoints.

mod dto;
mod google;

pub use google::{GoogleEndpoints, GoogleIdentityProvider, GoogleOAuthSettings};

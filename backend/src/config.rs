//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags and `CATALOG_*` environment variables. Optional
//! fields fall back to the defaults exposed by the accessors.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "item_catalog.db";
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 5000);
const DEFAULT_REDIRECT_URI: &str = "postmessage";

/// Runtime settings for the catalog service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// OAuth client id; the Google provider is used only when both the id
    /// and the secret are present.
    pub oauth_client_id: Option<String>,
    pub oauth_client_secret: Option<String>,
    pub oauth_redirect_uri: Option<String>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
    /// Permit a generated session key in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
}

/// Google client credentials, present only when fully configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl CatalogSettings {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// OAuth client credentials, or `None` when either half is missing.
    pub fn oauth_client(&self) -> Option<OAuthClient> {
        let client_id = self.oauth_client_id.as_deref()?.trim();
        let client_secret = self.oauth_client_secret.as_deref()?.trim();
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(OAuthClient {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            redirect_uri: self
                .oauth_redirect_uri
                .clone()
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "CATALOG_DATABASE_PATH",
        "CATALOG_BIND_ADDR",
        "CATALOG_OAUTH_CLIENT_ID",
        "CATALOG_OAUTH_CLIENT_SECRET",
        "CATALOG_OAUTH_REDIRECT_URI",
        "CATALOG_SESSION_KEY_FILE",
        "CATALOG_SESSION_COOKIE_SECURE",
        "CATALOG_ALLOW_EPHEMERAL_SESSION_KEY",
    ];

    fn load_from_empty_args() -> CatalogSettings {
        CatalogSettings::load_from_iter([OsString::from("catalog-backend")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.database_path(), PathBuf::from("item_catalog.db"));
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.session_cookie_secure);
        assert!(!settings.allow_ephemeral_session_key);
        assert!(settings.oauth_client().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOG_DATABASE_PATH", Some("/tmp/catalog.db".to_owned())),
            ("CATALOG_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            ("CATALOG_OAUTH_CLIENT_ID", Some("client".to_owned())),
            ("CATALOG_OAUTH_CLIENT_SECRET", Some("secret".to_owned())),
            ("CATALOG_OAUTH_REDIRECT_URI", None),
            ("CATALOG_SESSION_KEY_FILE", None),
            ("CATALOG_SESSION_COOKIE_SECURE", Some("false".to_owned())),
            ("CATALOG_ALLOW_EPHEMERAL_SESSION_KEY", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_path(), PathBuf::from("/tmp/catalog.db"));
        assert_eq!(settings.bind_addr().port(), 8080);
        assert!(!settings.session_cookie_secure);
        assert_eq!(
            settings.oauth_client(),
            Some(OAuthClient {
                client_id: "client".to_owned(),
                client_secret: "secret".to_owned(),
                redirect_uri: "postmessage".to_owned(),
            })
        );
    }

    #[rstest]
    #[case(Some("client"), None)]
    #[case(None, Some("secret"))]
    #[case(Some("  "), Some("secret"))]
    fn partial_oauth_credentials_are_ignored(
        #[case] id: Option<&str>,
        #[case] secret: Option<&str>,
    ) {
        let settings = CatalogSettings {
            database_path: None,
            bind_addr: None,
            oauth_client_id: id.map(str::to_owned),
            oauth_client_secret: secret.map(str::to_owned),
            oauth_redirect_uri: None,
            session_key_file: None,
            session_cookie_secure: true,
            allow_ephemeral_session_key: false,
        };
        assert!(settings.oauth_client().is_none());
    }
}

//! Session cookie configuration.
//!
//! Turns the session-related configuration values into a signing key and
//! cookie flags. Release builds insist on a key file of at least 64 bytes;
//! debug builds, or deployments that opt in explicitly, fall back to an
//! ephemeral key that invalidates sessions on restart.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroize;

const SESSION_KEY_MIN_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require a readable key of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Raw session inputs taken from the service configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionInputs {
    pub key_file: Option<PathBuf>,
    pub cookie_secure: bool,
    pub allow_ephemeral: bool,
}

/// Session settings ready to configure the cookie middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// No key file was configured and ephemeral keys are not allowed.
    #[error("no session key file configured; set CATALOG_SESSION_KEY_FILE")]
    MissingKeyFile,
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Build session settings from configuration values and build mode.
///
/// # Examples
///
/// ```rust
/// use catalog_backend::inbound::http::session_config::{
///     BuildMode, SessionInputs, session_settings,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("catalog_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let inputs = SessionInputs {
///     key_file: Some(key_path.clone()),
///     cookie_secure: true,
///     allow_ephemeral: false,
/// };
/// let settings = session_settings(&inputs, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    inputs: &SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let may_use_ephemeral = mode == BuildMode::Debug || inputs.allow_ephemeral;
    let key = match inputs.key_file.as_deref() {
        Some(path) => read_key(path, mode, may_use_ephemeral)?,
        None if may_use_ephemeral => {
            warn!("no session key file configured; using temporary session key (dev only)");
            Key::generate()
        }
        None => return Err(SessionConfigError::MissingKeyFile),
    };
    if !inputs.cookie_secure {
        warn!("session cookies are not marked Secure");
    }
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");

    Ok(SessionSettings {
        key,
        cookie_secure: inputs.cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn read_key(
    path: &Path,
    mode: BuildMode,
    may_use_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if may_use_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Truncated SHA-256 fingerprint of the key's signing material.
///
/// Lets operators tell keys apart in logs without exposing them.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn key_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn write_key(dir: &TempDir, len: usize) -> PathBuf {
        let path = dir.path().join("session_key");
        std::fs::write(&path, vec![b'k'; len]).expect("write key");
        path
    }

    #[rstest]
    fn release_accepts_long_keys(key_dir: TempDir) {
        let inputs = SessionInputs {
            key_file: Some(write_key(&key_dir, 64)),
            cookie_secure: true,
            allow_ephemeral: false,
        };
        let settings = session_settings(&inputs, BuildMode::Release).expect("settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    fn release_rejects_short_keys(key_dir: TempDir) {
        let inputs = SessionInputs {
            key_file: Some(write_key(&key_dir, 16)),
            cookie_secure: true,
            allow_ephemeral: false,
        };
        let result = session_settings(&inputs, BuildMode::Release);
        assert!(matches!(
            result,
            Err(SessionConfigError::KeyTooShort { length: 16, .. })
        ));
    }

    #[rstest]
    fn release_requires_a_key_file() {
        let result = session_settings(&SessionInputs::default(), BuildMode::Release);
        assert!(matches!(result, Err(SessionConfigError::MissingKeyFile)));
    }

    #[rstest]
    fn release_reports_unreadable_keys(key_dir: TempDir) {
        let inputs = SessionInputs {
            key_file: Some(key_dir.path().join("absent")),
            ..SessionInputs::default()
        };
        let result = session_settings(&inputs, BuildMode::Release);
        assert!(matches!(result, Err(SessionConfigError::KeyRead { .. })));
    }

    #[rstest]
    #[case(BuildMode::Debug, false)]
    #[case(BuildMode::Release, true)]
    fn ephemeral_keys_are_permitted_when_allowed(
        #[case] mode: BuildMode,
        #[case] allow_ephemeral: bool,
    ) {
        let inputs = SessionInputs {
            allow_ephemeral,
            ..SessionInputs::default()
        };
        assert!(session_settings(&inputs, mode).is_ok());
    }

    #[rstest]
    fn same_key_material_yields_same_fingerprint(key_dir: TempDir) {
        let path = write_key(&key_dir, 64);
        let bytes = std::fs::read(path).expect("read key");
        let first = key_fingerprint(&Key::derive_from(&bytes));
        let second = key_fingerprint(&Key::derive_from(&bytes));
        assert_eq!(first, second);
        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
    }
}

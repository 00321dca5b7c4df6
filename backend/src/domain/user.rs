//! User data model.
//!
//! Users are created once, on first login, from the profile an external
//! identity provider reports. They are never updated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyDisplayName,
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier issued by the store.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw integer.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(display_name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the natural key when matching external identities.
///
/// Surrounding whitespace is stripped; no further syntax checks are applied
/// because the identity provider has already verified the address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Profile asserted by an external identity provider.
///
/// This is the input to identity resolution; it carries no store identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub name: DisplayName,
    pub email: Email,
    pub picture: Option<String>,
}

impl ExternalIdentity {
    /// Build an identity from raw provider fields.
    ///
    /// A blank picture URL is treated as absent.
    ///
    /// # Examples
    /// ```
    /// use catalog_backend::domain::ExternalIdentity;
    ///
    /// let identity = ExternalIdentity::try_from_parts("Ada", " ada@example.com ", Some(""))
    ///     .expect("valid identity");
    /// assert_eq!(identity.email.as_str(), "ada@example.com");
    /// assert!(identity.picture.is_none());
    /// ```
    pub fn try_from_parts(
        name: impl Into<String>,
        email: impl AsRef<str>,
        picture: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: DisplayName::new(name)?,
            email: Email::new(email)?,
            picture: picture
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is unique across all users.
/// - Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
}

impl User {
    /// Assemble a user from a stored identifier and its profile.
    pub fn new(id: UserId, identity: ExternalIdentity) -> Self {
        let ExternalIdentity {
            name,
            email,
            picture,
        } = identity;
        Self {
            id,
            name,
            email,
            picture,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }
}

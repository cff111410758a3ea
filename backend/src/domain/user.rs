//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnitSystem;

/// Maximum accepted length, in characters, for a user identifier.
pub const USER_ID_MAX: usize = 128;

/// Validation errors returned when building user values from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    IdTooLong { max: usize },
    EmptyDisplayName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::IdTooLong { max } => write!(f, "user id must be at most {max} characters"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier chosen by the user at login.
///
/// Surrounding whitespace is trimmed on construction, so `" ada "` and
/// `"ada"` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Examples
    /// ```
    /// use weatherdesk::domain::UserId;
    ///
    /// let id = UserId::new("  ada  ").expect("valid id");
    /// assert_eq!(id.as_ref(), "ada");
    /// assert!(UserId::new("   ").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if trimmed.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Use the submitted name when present, otherwise fall back to the id.
    ///
    /// # Examples
    /// ```
    /// use weatherdesk::domain::{DisplayName, UserId};
    ///
    /// let id = UserId::new("ada").expect("valid id");
    /// assert_eq!(DisplayName::or_user_id(Some("  "), &id).as_ref(), "ada");
    /// assert_eq!(DisplayName::or_user_id(Some("Ada L"), &id).as_ref(), "Ada L");
    /// ```
    pub fn or_user_id(submitted: Option<&str>, id: &UserId) -> Self {
        submitted
            .and_then(|raw| Self::new(raw).ok())
            .unwrap_or_else(|| Self(id.as_ref().to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
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

/// Stored user record.
///
/// ## Invariants
/// - `id` is unique and never changes after creation.
/// - `created_at` is assigned by the store on first write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: DisplayName,
    pub default_units: UnitSystem,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields merged into the store by
/// [`UserRepository::upsert`](crate::domain::ports::UserRepository::upsert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpsert {
    pub id: UserId,
    pub display_name: DisplayName,
    pub default_units: UnitSystem,
    pub updated_at: DateTime<Utc>,
}

//! Saved locations owned by a user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Opaque location identifier.
///
/// Stores generate UUID v4 text. Identifiers arriving from requests are kept
/// verbatim; an identifier the store cannot interpret simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Wrap a raw identifier taken from a path or query string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id.to_string())
    }

    /// Interpret the identifier as a UUID when possible.
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validation errors returned by [`LocationDraft::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationValidationError {
    #[error("city, country code, and nickname are required")]
    MissingField,
}

/// Validated form input for a new location.
///
/// ## Invariants
/// - `city`, `country_code`, and `nickname` are non-empty and trimmed.
/// - `country_code` is uppercase. It is not checked against any list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
    city: String,
    country_code: String,
    nickname: String,
}

impl LocationDraft {
    /// # Examples
    /// ```
    /// use weatherdesk::domain::LocationDraft;
    ///
    /// let draft = LocationDraft::try_new(" Paris ", "fr", "Home").expect("valid draft");
    /// assert_eq!(draft.country_code(), "FR");
    /// assert!(LocationDraft::try_new("Paris", " ", "Home").is_err());
    /// ```
    pub fn try_new(
        city: &str,
        country_code: &str,
        nickname: &str,
    ) -> Result<Self, LocationValidationError> {
        let city = city.trim();
        let country_code = country_code.trim();
        let nickname = nickname.trim();
        if city.is_empty() || country_code.is_empty() || nickname.is_empty() {
            return Err(LocationValidationError::MissingField);
        }
        Ok(Self {
            city: city.to_owned(),
            country_code: country_code.to_uppercase(),
            nickname: nickname.to_owned(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }
}

/// Record handed to
/// [`LocationRepository::insert`](crate::domain::ports::LocationRepository::insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub draft: LocationDraft,
    pub created_at: DateTime<Utc>,
}

/// Stored location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub user_id: UserId,
    pub city: String,
    pub country_code: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

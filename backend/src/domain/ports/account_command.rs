//! Driving port for login and account preference use-cases.
//!
//! Inbound adapters call this port without knowing how users are stored, so
//! handler tests can substitute a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, ParseUnitSystemError, UnitSystem, User, UserId};

/// Login form contents after presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub user_id: UserId,
    /// Submitted display name; blank or absent falls back to the identifier.
    pub display_name: Option<String>,
    /// Submitted units. Only applied, and only validated, when the user is
    /// created; returning users keep their stored preference.
    pub default_units: Result<UnitSystem, ParseUnitSystemError>,
}

/// Whether a login created a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Created(User),
    Returning(User),
}

impl LoginOutcome {
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Returning(user) => user,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create the user on first sight, otherwise refresh its update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
    /// when a new user submitted an unknown unit system. Nothing is written.
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error>;

    /// Resolve a session identifier to its user, if it still exists.
    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Persist a new default unit system.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the user no longer exists.
    async fn set_units(&self, id: &UserId, units: UnitSystem) -> Result<(), Error>;
}

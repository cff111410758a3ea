//! Login and unit preference service.
//!
//! Implements [`AccountCommand`] on top of a [`UserRepository`]. Store
//! failures are logged here and reported to callers as internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    AccountCommand, LoginOutcome, LoginRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{DisplayName, Error, UnitSystem, User, UserId, UserUpsert};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::NotFound { id } => Error::not_found(format!("user {id} not found")),
        other => {
            error!(error = %other, "user repository failure");
            Error::internal(other.to_string())
        }
    }
}

/// Account service implementing the login driving port.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a new service backed by `users`.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error> {
        let LoginRequest {
            user_id,
            display_name,
            default_units,
        } = request;
        let existing = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?;

        // Returning users keep their stored name and units.
        let upsert = match &existing {
            Some(user) => UserUpsert {
                id: user_id.clone(),
                display_name: user.display_name.clone(),
                default_units: user.default_units,
                updated_at: self.clock.utc(),
            },
            None => UserUpsert {
                display_name: DisplayName::or_user_id(display_name.as_deref(), &user_id),
                id: user_id.clone(),
                default_units: default_units
                    .map_err(|error| Error::invalid_request(error.to_string()))?,
                updated_at: self.clock.utc(),
            },
        };

        let stored = self.users.upsert(&upsert).await.map_err(map_user_error)?;
        if existing.is_some() {
            Ok(LoginOutcome::Returning(stored))
        } else {
            info!(user_id = %user_id, "created user");
            Ok(LoginOutcome::Created(stored))
        }
    }

    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }

    async fn set_units(&self, id: &UserId, units: UnitSystem) -> Result<(), Error> {
        self.users
            .update_units(id, units, self.clock.utc())
            .await
            .map_err(map_user_error)
    }
}

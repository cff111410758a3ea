//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{UnitSystem, User, UserId, UserUpsert};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A partial update targeted a user that does not exist.
        NotFound { id: String } => "user {id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier. A missing user is `Ok(None)`.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Create the user or merge the supplied fields into the existing record.
    ///
    /// The store assigns `created_at` on first write only; `updated_at` is
    /// always overwritten. Returns the stored record.
    async fn upsert(&self, user: &UserUpsert) -> Result<User, UserPersistenceError>;

    /// Change the preferred unit system of an existing user.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when no record exists.
    async fn update_units(
        &self,
        id: &UserId,
        units: UnitSystem,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError>;
}

//! Port for location persistence.
//!
//! Locations are always addressed through their owning user. Adapters must
//! never return or delete a location that belongs to someone else.

use async_trait::async_trait;

use crate::domain::{Location, LocationId, NewLocation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location repository adapters.
    pub enum LocationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "location repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "location repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// All locations owned by `user`, ascending by nickname.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Location>, LocationPersistenceError>;

    /// Store a new location under `user` with a store-generated identifier.
    ///
    /// No uniqueness check is made against the user's other locations.
    async fn insert(
        &self,
        user: &UserId,
        location: &NewLocation,
    ) -> Result<Location, LocationPersistenceError>;

    /// Fetch one location, only if owned by `user`.
    async fn find(
        &self,
        user: &UserId,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationPersistenceError>;

    /// Remove a location. Removing an absent location succeeds.
    async fn delete(&self, user: &UserId, id: &LocationId) -> Result<(), LocationPersistenceError>;
}

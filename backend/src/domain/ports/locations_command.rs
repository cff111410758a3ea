//! Driving port for managing a user's saved locations.

use async_trait::async_trait;

use crate::domain::{Error, Location, LocationDraft, LocationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationsCommand: Send + Sync {
    /// Save a validated location for `user`.
    async fn add(&self, user: &UserId, draft: LocationDraft) -> Result<Location, Error>;

    /// Delete a location owned by `user`. Unknown identifiers succeed.
    async fn delete(&self, user: &UserId, id: &LocationId) -> Result<(), Error>;
}

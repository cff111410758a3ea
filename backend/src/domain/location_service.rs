//! Location management service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{LocationPersistenceError, LocationRepository, LocationsCommand};
use crate::domain::{Error, Location, LocationDraft, LocationId, NewLocation, UserId};

pub(crate) fn map_location_error(error: LocationPersistenceError) -> Error {
    error!(error = %error, "location repository failure");
    Error::internal(error.to_string())
}

/// Service implementing [`LocationsCommand`].
#[derive(Clone)]
pub struct LocationService<L> {
    locations: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> LocationService<L> {
    pub fn new(locations: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { locations, clock }
    }
}

#[async_trait]
impl<L> LocationsCommand for LocationService<L>
where
    L: LocationRepository,
{
    async fn add(&self, user: &UserId, draft: LocationDraft) -> Result<Location, Error> {
        let new_location = NewLocation {
            draft,
            created_at: self.clock.utc(),
        };
        let stored = self
            .locations
            .insert(user, &new_location)
            .await
            .map_err(map_location_error)?;
        info!(user_id = %user, location_id = %stored.id, "added location");
        Ok(stored)
    }

    async fn delete(&self, user: &UserId, id: &LocationId) -> Result<(), Error> {
        self.locations
            .delete(user, id)
            .await
            .map_err(map_location_error)
    }
}

//! In-process record store used when no database URL is configured.
//!
//! Both repository ports are implemented on one [`InMemoryRecordStore`] so
//! users and their locations share a single lock. Data lives only as long as
//! the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    LocationPersistenceError, LocationRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Location, LocationId, NewLocation, UnitSystem, User, UserId, UserUpsert};

#[derive(Debug, Default)]
struct Records {
    users: HashMap<UserId, User>,
    locations: HashMap<UserId, Vec<Location>>,
}

/// Mutex-guarded maps of users and their locations.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Records>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, String> {
        self.records
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let records = self.lock().map_err(UserPersistenceError::query)?;
        Ok(records.users.get(id).cloned())
    }

    async fn upsert(&self, user: &UserUpsert) -> Result<User, UserPersistenceError> {
        let mut records = self.lock().map_err(UserPersistenceError::query)?;
        let stored = records
            .users
            .entry(user.id.clone())
            .and_modify(|existing| {
                existing.display_name = user.display_name.clone();
                existing.default_units = user.default_units;
                existing.updated_at = user.updated_at;
            })
            .or_insert_with(|| User {
                id: user.id.clone(),
                display_name: user.display_name.clone(),
                default_units: user.default_units,
                created_at: user.updated_at,
                updated_at: user.updated_at,
            });
        Ok(stored.clone())
    }

    async fn update_units(
        &self,
        id: &UserId,
        units: UnitSystem,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        let mut records = self.lock().map_err(UserPersistenceError::query)?;
        let user = records
            .users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.as_ref()))?;
        user.default_units = units;
        user.updated_at = updated_at;
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for InMemoryRecordStore {
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Location>, LocationPersistenceError> {
        let records = self.lock().map_err(LocationPersistenceError::query)?;
        let mut listed = records.locations.get(user).cloned().unwrap_or_default();
        listed.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(listed)
    }

    async fn insert(
        &self,
        user: &UserId,
        location: &NewLocation,
    ) -> Result<Location, LocationPersistenceError> {
        let mut records = self.lock().map_err(LocationPersistenceError::query)?;
        let stored = Location {
            id: LocationId::generate(),
            user_id: user.clone(),
            city: location.draft.city().to_owned(),
            country_code: location.draft.country_code().to_owned(),
            nickname: location.draft.nickname().to_owned(),
            created_at: location.created_at,
            updated_at: location.created_at,
        };
        records
            .locations
            .entry(user.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        user: &UserId,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationPersistenceError> {
        let records = self.lock().map_err(LocationPersistenceError::query)?;
        Ok(records
            .locations
            .get(user)
            .and_then(|owned| owned.iter().find(|location| &location.id == id))
            .cloned())
    }

    async fn delete(&self, user: &UserId, id: &LocationId) -> Result<(), LocationPersistenceError> {
        let mut records = self.lock().map_err(LocationPersistenceError::query)?;
        if let Some(owned) = records.locations.get_mut(user) {
            owned.retain(|location| &location.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::fixture_timestamp;
    use crate::domain::{DisplayName, LocationDraft};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryRecordStore {
        InMemoryRecordStore::new()
    }

    fn user_id(raw: &str) -> UserId {
        UserId::new(raw).expect("valid user id")
    }

    fn new_location(nickname: &str) -> NewLocation {
        NewLocation {
            draft: LocationDraft::try_new("Paris", "fr", nickname).expect("valid draft"),
            created_at: fixture_timestamp(),
        }
    }

    fn upsert(id: &str, units: UnitSystem, at: DateTime<Utc>) -> UserUpsert {
        let id = user_id(id);
        UserUpsert {
            display_name: DisplayName::or_user_id(None, &id),
            id,
            default_units: units,
            updated_at: at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_keeps_creation_time_and_refreshes_update_time(store: InMemoryRecordStore) {
        let first = fixture_timestamp();
        let later = first + Duration::hours(1);

        store
            .upsert(&upsert("ada", UnitSystem::Metric, first))
            .await
            .expect("create");
        let stored = store
            .upsert(&upsert("ada", UnitSystem::Imperial, later))
            .await
            .expect("update");

        assert_eq!(stored.created_at, first);
        assert_eq!(stored.updated_at, later);
        assert_eq!(stored.default_units, UnitSystem::Imperial);
    }

    #[rstest]
    #[tokio::test]
    async fn update_units_requires_existing_user(store: InMemoryRecordStore) {
        let err = store
            .update_units(&user_id("ghost"), UnitSystem::Imperial, fixture_timestamp())
            .await
            .expect_err("no such user");
        assert_eq!(err, UserPersistenceError::not_found("ghost"));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_sorted_by_nickname_bytes(store: InMemoryRecordStore) {
        let owner = user_id("ada");
        for nickname in ["Zeta", "alpha", "Alpha"] {
            store
                .insert(&owner, &new_location(nickname))
                .await
                .expect("insert");
        }

        let listed = store.list_for_user(&owner).await.expect("list");
        let nicknames: Vec<_> = listed.iter().map(|l| l.nickname.as_str()).collect();

        assert_eq!(nicknames, ["Alpha", "Zeta", "alpha"]);
    }

    #[rstest]
    #[tokio::test]
    async fn locations_are_scoped_to_their_owner(store: InMemoryRecordStore) {
        let ada = user_id("ada");
        let bob = user_id("bob");
        let home = store
            .insert(&ada, &new_location("Home"))
            .await
            .expect("insert");

        assert!(store.find(&bob, &home.id).await.expect("find").is_none());
        store.delete(&bob, &home.id).await.expect("foreign delete is a no-op");
        assert!(store.find(&ada, &home.id).await.expect("find").is_some());
        assert!(store.list_for_user(&bob).await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_idempotent(store: InMemoryRecordStore) {
        let ada = user_id("ada");
        let home = store
            .insert(&ada, &new_location("Home"))
            .await
            .expect("insert");

        store.delete(&ada, &home.id).await.expect("first delete");
        store.delete(&ada, &home.id).await.expect("second delete");
        store
            .delete(&ada, &LocationId::new("never-existed"))
            .await
            .expect("unknown delete");

        assert!(store.list_for_user(&ada).await.expect("list").is_empty());
    }
}

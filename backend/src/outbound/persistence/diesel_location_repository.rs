//! PostgreSQL-backed `LocationRepository` implementation using Diesel ORM.
//!
//! Location identifiers are UUIDs in the database. Identifiers that do not
//! parse as a UUID cannot name a stored row, so lookups return `None` and
//! deletes succeed without touching the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{LocationPersistenceError, LocationRepository};
use crate::domain::{Location, LocationId, NewLocation, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LocationRow, NewLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::locations;

/// Diesel-backed implementation of the `LocationRepository` port.
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> LocationPersistenceError {
    map_pool_error(error, LocationPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> LocationPersistenceError {
    map_diesel_error(
        error,
        LocationPersistenceError::query,
        LocationPersistenceError::connection,
    )
}

fn row_to_location(row: LocationRow) -> Result<Location, LocationPersistenceError> {
    let user_id = UserId::new(&row.user_id).map_err(|err| {
        LocationPersistenceError::query(format!("invalid stored owner id: {err}"))
    })?;
    Ok(Location {
        id: LocationId::from_uuid(row.id),
        user_id,
        city: row.city,
        country_code: row.country_code,
        nickname: row.nickname,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Location>, LocationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<LocationRow> = locations::table
            .filter(locations::user_id.eq(user.as_ref()))
            .order(locations::nickname.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_location).collect()
    }

    async fn insert(
        &self,
        user: &UserId,
        location: &NewLocation,
    ) -> Result<Location, LocationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewLocationRow {
            id: Uuid::new_v4(),
            user_id: user.as_ref(),
            city: location.draft.city(),
            country_code: location.draft.country_code(),
            nickname: location.draft.nickname(),
            created_at: location.created_at,
            updated_at: location.created_at,
        };

        let row: LocationRow = diesel::insert_into(locations::table)
            .values(&new_row)
            .returning(LocationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_location(row)
    }

    async fn find(
        &self,
        user: &UserId,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationPersistenceError> {
        let Some(location_id) = id.as_uuid() else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<LocationRow> = locations::table
            .filter(locations::id.eq(location_id))
            .filter(locations::user_id.eq(user.as_ref()))
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn delete(&self, user: &UserId, id: &LocationId) -> Result<(), LocationPersistenceError> {
        let Some(location_id) = id.as_uuid() else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(
            locations::table
                .filter(locations::id.eq(location_id))
                .filter(locations::user_id.eq(user.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(diesel_error)
    }
}

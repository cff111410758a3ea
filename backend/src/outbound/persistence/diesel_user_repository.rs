//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, UnitSystem, User, UserId, UserUpsert};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUnitsUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(&row.id)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored user id: {err}")))?;
    let default_units = row.default_units.parse().unwrap_or_else(|_| {
        warn!(
            value = %row.default_units,
            user_id = %id,
            "unrecognised default_units value, defaulting to metric"
        );
        UnitSystem::Metric
    });
    Ok(User {
        display_name: DisplayName::or_user_id(Some(&row.display_name), &id),
        id,
        default_units,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_ref())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn upsert(&self, user: &UserUpsert) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewUserRow {
            id: user.id.as_ref(),
            display_name: user.display_name.as_ref(),
            default_units: user.default_units.as_str(),
            updated_at: user.updated_at,
        };

        // created_at is omitted from the update set so the first write wins.
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::display_name.eq(excluded(users::display_name)),
                users::default_units.eq(excluded(users::default_units)),
                users::updated_at.eq(excluded(users::updated_at)),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_user(row)
    }

    async fn update_units(
        &self,
        id: &UserId,
        units: UnitSystem,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = UserUnitsUpdate {
            default_units: units.as_str(),
            updated_at,
        };
        let updated = diesel::update(users::table.find(id.as_ref()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::not_found(id.as_ref()));
        }
        Ok(())
    }
}

//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here are thin: they translate between Diesel rows
//! (`models.rs`, `schema.rs`) and domain types and hold no business rules.
//! Connections come from a `bb8` pool through `diesel-async`.
//!
//! ```ignore
//! use weatherdesk::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/weatherdesk")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_location_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_location_repository::DieselLocationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

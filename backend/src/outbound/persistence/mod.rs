//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the relational ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Economy rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Units of work**: [`DieselTransactionCoordinator`] wraps each unit in a
//!   database transaction and locks player rows it reads.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselPlayerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/arcade")).await?;
//! let players = DieselPlayerRepository::new(pool);
//! ```

mod diesel_catalog_repository;
mod diesel_ownership_repository;
mod diesel_player_repository;
mod diesel_score_repository;
mod diesel_transaction_coordinator;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_ownership_repository::DieselOwnershipRepository;
pub use diesel_player_repository::DieselPlayerRepository;
pub use diesel_score_repository::DieselScoreRepository;
pub use diesel_transaction_coordinator::DieselTransactionCoordinator;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

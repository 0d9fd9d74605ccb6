//! PostgreSQL-backed `OwnershipRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OwnershipRepository, OwnershipRepositoryError};
use crate::domain::{CollectibleId, Ownership, UserId};

use super::error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::OwnershipRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_collectibles;

/// Diesel-backed implementation of the ownership port.
#[derive(Clone)]
pub struct DieselOwnershipRepository {
    pool: DbPool,
}

impl DieselOwnershipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> OwnershipRepositoryError {
    map_pool_error(error, OwnershipRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> OwnershipRepositoryError {
    map_diesel_error(
        error,
        ErrorKinds {
            connection: OwnershipRepositoryError::connection,
            query: OwnershipRepositoryError::query,
            duplicate: OwnershipRepositoryError::query,
        },
    )
}

#[async_trait]
impl OwnershipRepository for DieselOwnershipRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Ownership>, OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<OwnershipRow> = user_collectibles::table
            .filter(user_collectibles::user_id.eq(user_id.as_uuid()))
            .order(user_collectibles::id.asc())
            .select(OwnershipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Ownership::from).collect())
    }

    async fn find(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<Option<Ownership>, OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<OwnershipRow> = user_collectibles::table
            .filter(user_collectibles::user_id.eq(user_id.as_uuid()))
            .filter(user_collectibles::collectible_id.eq(collectible_id.as_uuid()))
            .select(OwnershipRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Ownership::from))
    }

    async fn create(&self, ownership: &Ownership) -> Result<(), OwnershipRepositoryError> {
        self.batch_create(std::slice::from_ref(ownership)).await
    }

    async fn batch_create(&self, rows: &[Ownership]) -> Result<(), OwnershipRepositoryError> {
        if rows.is_empty() {
            return Ok(());
        }
        let values: Vec<OwnershipRow> = rows.iter().map(OwnershipRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(user_collectibles::table)
            .values(&values)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<(), OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(
            user_collectibles::table
                .filter(user_collectibles::user_id.eq(user_id.as_uuid()))
                .filter(user_collectibles::collectible_id.eq(collectible_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel)
    }
}

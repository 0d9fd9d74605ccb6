//! PostgreSQL-backed `CatalogRepository` adapter.
//!
//! The `seq` identity column records insertion order; `list` sorts on it so
//! the weighted walk sees the same sequence on every load.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};
use crate::domain::{Catalog, Collectible, CollectibleId};

use super::error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{CollectibleRow, NewCollectibleRow};
use super::pool::{DbPool, PoolError};
use super::schema::collectibles;

/// Diesel-backed implementation of the catalogue port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CatalogRepositoryError {
    map_pool_error(error, CatalogRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> CatalogRepositoryError {
    map_diesel_error(
        error,
        ErrorKinds {
            connection: CatalogRepositoryError::connection,
            query: CatalogRepositoryError::query,
            duplicate: CatalogRepositoryError::query,
        },
    )
}

fn row_to_collectible(row: CollectibleRow) -> Result<Collectible, CatalogRepositoryError> {
    Collectible::try_from(row).map_err(CatalogRepositoryError::query)
}

#[async_trait]
impl CatalogRepository for DieselCatalogRepository {
    async fn find_by_id(
        &self,
        id: &CollectibleId,
    ) -> Result<Option<Collectible>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<CollectibleRow> = collectibles::table
            .find(id.as_uuid())
            .select(CollectibleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_collectible).transpose()
    }

    async fn list(&self) -> Result<Catalog, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<CollectibleRow> = collectibles::table
            .order(collectibles::seq.asc())
            .select(CollectibleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_collectible).collect()
    }

    async fn create(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError> {
        self.batch_create(std::slice::from_ref(collectible)).await
    }

    async fn batch_create(
        &self,
        collectibles: &[Collectible],
    ) -> Result<(), CatalogRepositoryError> {
        if collectibles.is_empty() {
            return Ok(());
        }
        let rows = collectibles
            .iter()
            .map(NewCollectibleRow::from_collectible)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CatalogRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(collectibles::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError> {
        let row =
            NewCollectibleRow::from_collectible(collectible).map_err(CatalogRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let updated = diesel::update(collectibles::table.find(collectible.id().as_uuid()))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        if updated == 0 {
            return Err(CatalogRepositoryError::query(format!(
                "collectible {} not found",
                collectible.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &CollectibleId) -> Result<(), CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(collectibles::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}

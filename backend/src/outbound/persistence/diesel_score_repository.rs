//! PostgreSQL-backed `ScoreRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ScoreEvent;
use crate::domain::ports::{ScoreRepository, ScoreRepositoryError};

use super::error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::ScoreRow;
use super::pool::{DbPool, PoolError};
use super::schema::scores;

/// Diesel-backed implementation of the score log port.
#[derive(Clone)]
pub struct DieselScoreRepository {
    pool: DbPool,
}

impl DieselScoreRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ScoreRepositoryError {
    map_pool_error(error, ScoreRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> ScoreRepositoryError {
    map_diesel_error(
        error,
        ErrorKinds {
            connection: ScoreRepositoryError::connection,
            query: ScoreRepositoryError::query,
            duplicate: ScoreRepositoryError::query,
        },
    )
}

#[async_trait]
impl ScoreRepository for DieselScoreRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ScoreEvent>, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ScoreRow> = scores::table
            .find(id)
            .select(ScoreRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(|row| ScoreEvent::try_from(row).map_err(ScoreRepositoryError::query))
            .transpose()
    }

    async fn create(&self, event: &ScoreEvent) -> Result<(), ScoreRepositoryError> {
        let row = ScoreRow::try_from(event).map_err(ScoreRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(scores::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(scores::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}

//! PostgreSQL-backed `PlayerRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PlayerRepository, PlayerRepositoryError};
use crate::domain::{EmailAddress, PlayerAccount, UserId};

use super::error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{NewPlayerRow, PlayerLedgerUpdate, PlayerRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the player repository port.
#[derive(Clone)]
pub struct DieselPlayerRepository {
    pool: DbPool,
}

impl DieselPlayerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PlayerRepositoryError {
    map_pool_error(error, PlayerRepositoryError::connection)
}

fn map_diesel(error: DieselError) -> PlayerRepositoryError {
    map_diesel_error(
        error,
        ErrorKinds {
            connection: PlayerRepositoryError::connection,
            query: PlayerRepositoryError::query,
            duplicate: PlayerRepositoryError::duplicate,
        },
    )
}

fn row_to_account(row: PlayerRow) -> Result<PlayerAccount, PlayerRepositoryError> {
    PlayerAccount::try_from(row).map_err(PlayerRepositoryError::query)
}

#[async_trait]
impl PlayerRepository for DieselPlayerRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PlayerAccount>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<PlayerRow> = users::table
            .find(id.as_uuid())
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<PlayerRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn create(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError> {
        let row = NewPlayerRow::from_account(account).map_err(PlayerRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError> {
        let changes =
            PlayerLedgerUpdate::from_account(account).map_err(PlayerRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let updated = diesel::update(users::table.find(account.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        if updated == 0 {
            return Err(PlayerRepositoryError::query(format!(
                "player {} not found",
                account.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}

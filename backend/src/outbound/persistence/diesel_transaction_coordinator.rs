//! PostgreSQL unit-of-work adapter.
//!
//! Each unit runs inside one `BEGIN ... COMMIT` on a pooled connection.
//! Player reads take `SELECT ... FOR UPDATE`, so concurrent units touching
//! the same player serialise on the row lock until the first commits.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    TransactionCoordinator, TransactionError, TransactionScope, UnitOfWork,
};
use crate::domain::{EmailAddress, Ownership, PlayerAccount, ScoreEvent, UserId};

use super::error_mapping::{ErrorKinds, map_diesel_error, map_pool_error};
use super::models::{NewPlayerRow, OwnershipRow, PlayerLedgerUpdate, PlayerRow, ScoreRow};
use super::pool::{DbPool, PoolError};
use super::schema::{scores, user_collectibles, users};

/// Runs units of work as PostgreSQL transactions.
#[derive(Clone)]
pub struct DieselTransactionCoordinator {
    pool: DbPool,
}

impl DieselTransactionCoordinator {
    /// Create a coordinator drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> TransactionError {
    map_pool_error(error, TransactionError::connection)
}

fn map_diesel(error: DieselError) -> TransactionError {
    map_diesel_error(
        error,
        ErrorKinds {
            connection: TransactionError::connection,
            query: TransactionError::query,
            duplicate: TransactionError::conflict,
        },
    )
}

/// Failure of a unit: either the caller's own error or one raised by Diesel
/// while opening, committing or rolling back.
enum UnitError<E> {
    Work(E),
    Diesel(DieselError),
}

impl<E> From<DieselError> for UnitError<E> {
    fn from(value: DieselError) -> Self {
        Self::Diesel(value)
    }
}

struct DieselTransactionScope<'c> {
    conn: &'c mut AsyncPgConnection,
}

fn rehydrate(row: Option<PlayerRow>) -> Result<Option<PlayerAccount>, TransactionError> {
    row.map(|row| PlayerAccount::try_from(row).map_err(TransactionError::query))
        .transpose()
}

#[async_trait]
impl TransactionScope for DieselTransactionScope<'_> {
    async fn lock_player(
        &mut self,
        id: &UserId,
    ) -> Result<Option<PlayerAccount>, TransactionError> {
        let row: Option<PlayerRow> = users::table
            .find(id.as_uuid())
            .select(PlayerRow::as_select())
            .for_update()
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        rehydrate(row)
    }

    async fn lock_player_by_email(
        &mut self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, TransactionError> {
        let row: Option<PlayerRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(PlayerRow::as_select())
            .for_update()
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        rehydrate(row)
    }

    async fn create_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError> {
        let row = NewPlayerRow::from_account(account).map_err(TransactionError::query)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError> {
        let changes = PlayerLedgerUpdate::from_account(account).map_err(TransactionError::query)?;
        let updated = diesel::update(users::table.find(account.id().as_uuid()))
            .set(&changes)
            .execute(&mut *self.conn)
            .await
            .map_err(map_diesel)?;
        if updated == 0 {
            return Err(TransactionError::query(format!(
                "player {} not found",
                account.id()
            )));
        }
        Ok(())
    }

    async fn insert_score(&mut self, event: &ScoreEvent) -> Result<(), TransactionError> {
        let row = ScoreRow::try_from(event).map_err(TransactionError::query)?;
        diesel::insert_into(scores::table)
            .values(&row)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn insert_ownerships(&mut self, rows: &[Ownership]) -> Result<(), TransactionError> {
        if rows.is_empty() {
            return Ok(());
        }
        let values: Vec<OwnershipRow> = rows.iter().map(OwnershipRow::from).collect();
        diesel::insert_into(user_collectibles::table)
            .values(&values)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}

#[async_trait]
impl TransactionCoordinator for DieselTransactionCoordinator {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn TransactionScope) -> UnitOfWork<'t, T, E> + Send + 'static,
    {
        let mut conn = self.pool.get().await.map_err(|err| E::from(map_pool(err)))?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let mut scope = DieselTransactionScope { conn };
                    work(&mut scope).await.map_err(UnitError::Work)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(value) => Ok(value),
            Err(UnitError::Work(err)) => {
                debug!("unit of work rolled back");
                Err(err)
            }
            Err(UnitError::Diesel(err)) => Err(E::from(map_diesel(err))),
        }
    }
}

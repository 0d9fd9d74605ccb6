//! Diesel and pool error translation shared by the Postgres adapters.
//!
//! Each adapter passes its own port error constructors; the helpers decide
//! which one a failure belongs to and log the raw cause at `debug`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for a port error, one per failure class.
pub(crate) struct ErrorKinds<C, Q, D> {
    pub connection: C,
    pub query: Q,
    pub duplicate: D,
}

/// Flatten a pool error into the adapter's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %error,
            "diesel operation failed"
        ),
    }
}

/// Classify a Diesel error.
///
/// Unique violations go to `duplicate`, dropped connections to `connection`,
/// everything else to `query`. Messages are generic so SQL text never
/// reaches the domain.
pub(crate) fn map_diesel_error<E, C, Q, D>(error: DieselError, kinds: ErrorKinds<C, Q, D>) -> E
where
    C: FnOnce(String) -> E,
    Q: FnOnce(String) -> E,
    D: FnOnce(String) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => (kinds.query)("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => (kinds.query)("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unique constraint");
            (kinds.duplicate)(format!("{constraint} violated"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (kinds.connection)("database connection error".to_owned())
        }
        _ => (kinds.query)("database error".to_owned()),
    }
}

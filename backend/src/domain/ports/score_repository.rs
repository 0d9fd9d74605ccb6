//! Port for the append-only score log.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ScoreEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by score repository adapters.
    pub enum ScoreRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "score repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "score repository query failed: {message}",
    }
}

/// Durable score events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Fetch one event.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ScoreEvent>, ScoreRepositoryError>;

    /// Append an event.
    async fn create(&self, event: &ScoreEvent) -> Result<(), ScoreRepositoryError>;

    /// Remove an event.
    async fn delete(&self, id: &Uuid) -> Result<(), ScoreRepositoryError>;
}

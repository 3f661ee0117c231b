pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameSettlement, QuoteGameEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for quote games.
pub trait GameStore: Send + Sync {
    /// Persist a freshly generated game.
    fn insert_game(&self, game: QuoteGameEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuoteGameEntity>>>;
    /// Record the outcome of a game, only if it is not completed yet.
    ///
    /// Resolves to `false` when the game is unknown or was settled by someone else.
    fn settle_game(
        &self,
        id: Uuid,
        settlement: GameSettlement,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Short backend name reported by the health check.
    fn backend(&self) -> &'static str;
}

//! Process-local game store, used for development and tests.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{self, BoxFuture};
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::{GameSettlement, QuoteGameEntity},
    storage::StorageResult,
};

#[derive(Clone, Default)]
pub struct MemoryGameStore {
    games: Arc<DashMap<Uuid, QuoteGameEntity>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of games held by the store.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for MemoryGameStore {
    fn insert_game(&self, game: QuoteGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.games.insert(game.id, game);
        Box::pin(future::ready(Ok(())))
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuoteGameEntity>>> {
        let game = self.games.get(&id).map(|entry| entry.value().clone());
        Box::pin(future::ready(Ok(game)))
    }

    fn settle_game(
        &self,
        id: Uuid,
        settlement: GameSettlement,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        // The entry guard holds the shard lock, so check-and-set is atomic.
        let settled = self
            .games
            .get_mut(&id)
            .is_some_and(|mut entry| entry.settle(settlement));
        Box::pin(future::ready(Ok(settled)))
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(future::ready(Ok(())))
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(future::ready(Ok(())))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

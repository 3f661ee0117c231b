use std::sync::Arc;

use futures::future::BoxFuture;
use mongodb::{
    Client, Collection, Database,
    bson::{Bson, DateTime, doc},
    options::IndexOptions,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoQuoteGameDocument, doc_id},
};
use crate::dao::{
    game_store::GameStore,
    models::{GameSettlement, QuoteGameEntity},
    storage::StorageResult,
};

const GAME_COLLECTION_NAME: &str = "quote_games";

#[derive(Clone)]
pub struct MongoGameStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self.collection().await;
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"created_at": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("quote_game_created_at_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION_NAME,
                index: "created_at",
                source,
            })?;

        Ok(())
    }

    async fn collection(&self) -> Collection<MongoQuoteGameDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoQuoteGameDocument>(GAME_COLLECTION_NAME)
    }

    async fn insert_game(&self, game: QuoteGameEntity) -> MongoResult<()> {
        let id = game.id;
        let document: MongoQuoteGameDocument = game.into();
        self.collection()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::InsertGame { id, source })?;
        Ok(())
    }

    async fn find_game(&self, id: Uuid) -> MongoResult<Option<QuoteGameEntity>> {
        let document = self
            .collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;

        document.map(QuoteGameEntity::try_from).transpose()
    }

    async fn settle_game(&self, id: Uuid, settlement: GameSettlement) -> MongoResult<bool> {
        // Matching on a null `completed_at` keeps concurrent settlements from both winning.
        let mut filter = doc_id(id);
        filter.insert("completed_at", Bson::Null);

        let update = doc! {
            "$set": {
                "completed_at": DateTime::from_system_time(settlement.completed_at),
                "correct": settlement.correct.to_vec(),
            }
        };

        let result = self
            .collection()
            .await
            .update_one(filter, update)
            .await
            .map_err(|source| MongoDaoError::SettleGame { id, source })?;

        Ok(result.modified_count > 0)
    }
}

impl GameStore for MongoGameStore {
    fn insert_game(&self, game: QuoteGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_game(game).await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuoteGameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn settle_game(
        &self,
        id: Uuid,
        settlement: GameSettlement,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.settle_game(id, settlement).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

pub mod quote_game;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{
    config::AppConfig,
    dao::{game_store::GameStore, quote_source::QuoteSource},
    error::ServiceError,
};

pub type SharedState = Arc<AppState>;

/// Central application state: configuration, the quote provider and the game store.
pub struct AppState {
    config: AppConfig,
    quote_source: Arc<dyn QuoteSource>,
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a game store is installed.
    pub fn new(config: AppConfig, quote_source: Arc<dyn QuoteSource>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            quote_source,
            game_store: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Client used to reach the external quote provider.
    pub fn quote_source(&self) -> &Arc<dyn QuoteSource> {
        &self.quote_source
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Game store for request handling, refused while degraded.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        if self.is_degraded() {
            return Err(ServiceError::Degraded);
        }
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn install_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current game store and enter degraded mode.
    pub async fn clear_game_store(&self) {
        {
            let mut guard = self.game_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update the degraded flag, notifying watchers only when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use futures::future::{self, BoxFuture};

    use super::*;
    use crate::dao::{
        game_store::memory::MemoryGameStore,
        quote_source::{QuoteSourceError, QuoteSourceResult},
    };
    use crate::state::quote_game::Quote;

    struct NoQuotes;

    impl QuoteSource for NoQuotes {
        fn random_quotes(&self, amount: usize) -> BoxFuture<'static, QuoteSourceResult<Vec<Quote>>> {
            Box::pin(future::ready(Err(QuoteSourceError::AmountOutOfRange { amount })))
        }

        fn quote(&self, id: i64) -> BoxFuture<'static, QuoteSourceResult<Quote>> {
            Box::pin(future::ready(Err(QuoteSourceError::UnknownQuote { id })))
        }

        fn quotes(
            &self,
            _ids: Vec<i64>,
        ) -> BoxFuture<'static, QuoteSourceResult<HashMap<i64, Quote>>> {
            Box::pin(future::ready(Ok(HashMap::new())))
        }
    }

    #[tokio::test]
    async fn starts_degraded_until_store_installed() {
        let state = AppState::new(AppConfig::default(), Arc::new(NoQuotes));
        assert!(state.is_degraded());
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));

        let mut watcher = state.degraded_watcher();
        state.install_game_store(Arc::new(MemoryGameStore::new())).await;
        assert!(!state.is_degraded());
        assert!(state.require_game_store().await.is_ok());
        tokio::time::timeout(Duration::from_secs(1), watcher.changed())
            .await
            .unwrap()
            .unwrap();
        assert!(!*watcher.borrow());

        state.clear_game_store().await;
        assert!(state.is_degraded());
        assert!(state.game_store().await.is_none());
    }

    #[tokio::test]
    async fn degraded_flag_blocks_installed_store() {
        let state = AppState::new(AppConfig::default(), Arc::new(NoQuotes));
        state.install_game_store(Arc::new(MemoryGameStore::new())).await;

        state.update_degraded(true);
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));
        assert!(state.game_store().await.is_some());
    }
}

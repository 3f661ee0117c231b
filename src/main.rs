//! Quote game backend binary entrypoint wiring the REST API, the quote provider and the game store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_game_back::{
    config::AppConfig,
    dao::{game_store::memory::MemoryGameStore, quote_source::DummyJsonQuoteSource},
    routes,
    state::{AppState, SharedState},
};

#[cfg(feature = "mongo-store")]
const DEFAULT_STORE_BACKEND: &str = "mongo";
#[cfg(not(feature = "mongo-store"))]
const DEFAULT_STORE_BACKEND: &str = "memory";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let quote_source = DummyJsonQuoteSource::new(&config.quote_api.base_url, config.quote_api.timeout)
        .context("building quote provider client")?;

    let app_state = AppState::new(config, Arc::new(quote_source));
    tokio::spawn(log_degraded_transitions(app_state.clone()));

    let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| DEFAULT_STORE_BACKEND.into());
    match backend.as_str() {
        "memory" => {
            info!("using in-memory game store");
            app_state
                .install_game_store(Arc::new(MemoryGameStore::new()))
                .await;
        }
        "mongo" | "mongodb" => spawn_mongo_supervisor(app_state.clone()).await?,
        other => bail!("unknown STORE_BACKEND `{other}` (expected `memory` or `mongo`)"),
    }

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

#[cfg(feature = "mongo-store")]
async fn spawn_mongo_supervisor(state: SharedState) -> anyhow::Result<()> {
    use quote_game_back::{
        dao::{
            game_store::{
                GameStore,
                mongodb::{MongoConfig, MongoGameStore},
            },
            storage::StorageError,
        },
        services::storage_supervisor,
    };

    let config = MongoConfig::from_env()
        .await
        .context("reading MongoDB configuration")?;
    info!(database = %config.database_name, "using MongoDB game store");

    tokio::spawn(storage_supervisor::run(state, move || {
        let config = config.clone();
        async move {
            MongoGameStore::connect(config)
                .await
                .map(|store| Arc::new(store) as Arc<dyn GameStore>)
                .map_err(StorageError::from)
        }
    }));
    Ok(())
}

#[cfg(not(feature = "mongo-store"))]
async fn spawn_mongo_supervisor(_state: SharedState) -> anyhow::Result<()> {
    bail!("MongoDB support is not compiled in; rebuild with the `mongo-store` feature")
}

/// Log every switch in and out of degraded mode.
async fn log_degraded_transitions(state: SharedState) {
    let mut watcher = state.degraded_watcher();
    while watcher.changed().await.is_ok() {
        if *watcher.borrow_and_update() {
            warn!("entered degraded mode; game routes answer 503");
        } else {
            info!("left degraded mode");
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

//! Fake dummyjson-compatible quote provider for integration tests.
#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Requests served by the fake provider.
#[derive(Default)]
pub struct ProviderHits {
    pub random: AtomicUsize,
    pub by_id: AtomicUsize,
}

impl ProviderHits {
    pub fn random(&self) -> usize {
        self.random.load(Ordering::SeqCst)
    }

    pub fn by_id(&self) -> usize {
        self.by_id.load(Ordering::SeqCst)
    }
}

/// Canned behaviour for the fake provider.
#[derive(Clone, Copy, Default)]
pub enum ProviderMode {
    #[default]
    Healthy,
    /// Every request answers with this status code.
    Status(u16),
    /// Every request answers 200 with a body that isn't a quote.
    Garbage,
}

#[derive(Clone)]
struct ProviderState {
    mode: ProviderMode,
    hits: Arc<ProviderHits>,
}

pub fn catalog() -> Vec<Value> {
    vec![
        json!({"id": 1386, "quote": "It Is Most Pleasant To Commit A Just Action Which Is Disagreeable To Someone Whom One Does Not Like.", "author": "Victor Hugo"}),
        json!({"id": 172, "quote": "The only lasting beauty is the beauty of the heart.", "author": "Rumi"}),
        json!({"id": 454, "quote": "Risk Comes From Not Knowing What You'Re Doing.", "author": "Warren Buffett"}),
    ]
}

async fn random_quotes(
    State(state): State<ProviderState>,
    Path(amount): Path<usize>,
) -> Response {
    state.hits.random.fetch_add(1, Ordering::SeqCst);
    match state.mode {
        ProviderMode::Healthy => {
            let quotes: Vec<Value> = catalog().into_iter().take(amount).collect();
            Json(quotes).into_response()
        }
        ProviderMode::Status(code) => status(code),
        ProviderMode::Garbage => Json(json!({"unexpected": true})).into_response(),
    }
}

async fn quote_by_id(State(state): State<ProviderState>, Path(id): Path<i64>) -> Response {
    state.hits.by_id.fetch_add(1, Ordering::SeqCst);
    match state.mode {
        ProviderMode::Healthy => catalog()
            .into_iter()
            .find(|quote| quote["id"] == json!(id))
            .map(|quote| Json(quote).into_response())
            .unwrap_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": format!("Quote with id '{id}' not found")})),
                )
                    .into_response()
            }),
        ProviderMode::Status(code) => status(code),
        ProviderMode::Garbage => Json(json!("not a quote")).into_response(),
    }
}

fn status(code: u16) -> Response {
    StatusCode::from_u16(code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

/// Start the fake provider on a random local port and return its base URL.
pub async fn spawn_provider(mode: ProviderMode) -> (String, Arc<ProviderHits>) {
    let hits = Arc::new(ProviderHits::default());
    let app = Router::new()
        .route("/quotes/random/{amount}", get(random_quotes))
        .route("/quotes/{id}", get(quote_by_id))
        .with_state(ProviderState {
            mode,
            hits: hits.clone(),
        });

    let addr = serve(app).await;
    (format!("http://{addr}"), hits)
}

/// Serve `app` on a random local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

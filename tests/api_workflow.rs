mod common;

use std::{sync::Arc, time::Duration};

use common::{ProviderMode, spawn_provider};
use quote_game_back::{
    config::{AppConfig, QuoteApiConfig},
    dao::{game_store::memory::MemoryGameStore, quote_source::DummyJsonQuoteSource},
    routes,
    state::{AppState, SharedState},
};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

struct TestApp {
    base_url: String,
    state: SharedState,
    client: Client,
}

impl TestApp {
    async fn spawn(mode: ProviderMode) -> (Self, Arc<common::ProviderHits>) {
        let (provider_url, hits) = spawn_provider(mode).await;
        let config = AppConfig {
            quote_api: QuoteApiConfig {
                base_url: provider_url,
                timeout: Duration::from_secs(5),
            },
            answer_window: Duration::from_secs(60),
        };
        let source =
            DummyJsonQuoteSource::new(&config.quote_api.base_url, config.quote_api.timeout)
                .unwrap();
        let state = AppState::new(config, Arc::new(source));
        state
            .install_game_store(Arc::new(MemoryGameStore::new()))
            .await;

        let addr = common::serve(routes::router(state.clone())).await;
        let app = Self {
            base_url: format!("http://{addr}"),
            state,
            client: Client::new(),
        };
        (app, hits)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

fn answer_path(game: &Value) -> String {
    format!("/quote-game/{}/answer", game["id"].as_str().unwrap())
}

#[tokio::test]
async fn play_a_quote_game() {
    let (app, hits) = TestApp::spawn(ProviderMode::Healthy).await;

    let (status, game) = app.post("/quote-game", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        game["authors"],
        json!(["Rumi", "Victor Hugo", "Warren Buffett"])
    );
    let quote_ids: Vec<i64> = game["quotes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|quote| quote["id"].as_i64().unwrap())
        .collect();
    assert_eq!(quote_ids, vec![1386, 454, 172]);
    assert!(game["quotes"][0].get("author").is_none());
    assert!(game["expires_at"].as_str().is_some());

    let (status, result) = app
        .post(
            &answer_path(&game),
            Some(json!([
                {"id": 172, "author": "Rumi"},
                {"id": 1386, "author": "Warren Buffett"},
                {"id": 454, "author": "Victor Hugo"}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        result,
        json!({
            "id": game["id"],
            "answers": [
                {"id": 1386, "correct": false, "actual_author": "Victor Hugo"},
                {"id": 454, "correct": false, "actual_author": "Warren Buffett"},
                {"id": 172, "correct": true, "actual_author": "Rumi"}
            ]
        })
    );
    assert_eq!(hits.by_id(), 3);

    let (status, body) = app
        .post(
            &answer_path(&game),
            Some(json!([
                {"id": 172, "author": "Rumi"},
                {"id": 1386, "author": "Victor Hugo"},
                {"id": 454, "author": "Warren Buffett"}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "quote_game_id_not_found"}));
    assert_eq!(hits.by_id(), 3);
}

#[tokio::test]
async fn answers_must_match_the_game() {
    let (app, hits) = TestApp::spawn(ProviderMode::Healthy).await;
    let (_, game) = app.post("/quote-game", None).await;

    let (status, body) = app
        .post(
            &answer_path(&game),
            Some(json!([
                {"id": 172, "author": "Rumi"},
                {"id": 1386, "author": "Victor Hugo"},
                {"id": 1, "author": "Warren Buffett"}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"message": "invalid_quote_id"}));

    let (status, body) = app
        .post(
            &answer_path(&game),
            Some(json!([{"id": 172, "author": "Rumi"}])),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"message": "invalid_quote_id"}));
    assert_eq!(hits.by_id(), 0);
}

#[tokio::test]
async fn malformed_answers_fail_validation() {
    let (app, _) = TestApp::spawn(ProviderMode::Healthy).await;
    let (_, game) = app.post("/quote-game", None).await;

    let (status, body) = app
        .post(
            &answer_path(&game),
            Some(json!([
                {"id": 172, "author": ""},
                {"id": 172, "author": "Rumi"},
                {"id": 454, "author": "Victor Hugo"}
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "validation_failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["author", "id"]);

    let (status, body) = app
        .post(&answer_path(&game), Some(json!({"id": 172})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "invalid_body");
}

#[tokio::test]
async fn unknown_games_are_not_found() {
    let (app, _) = TestApp::spawn(ProviderMode::Healthy).await;
    let answers = json!([
        {"id": 172, "author": "Rumi"},
        {"id": 1386, "author": "Victor Hugo"},
        {"id": 454, "author": "Warren Buffett"}
    ]);

    let (status, body) = app
        .post(
            "/quote-game/6f1c1a6e-8f3e-4c2b-9a55-0d7f3c1b2a90/answer",
            Some(answers.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "quote_game_id_not_found"}));

    let (status, body) = app
        .post("/quote-game/not-a-game/answer", Some(answers))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "quote_game_id_not_found"}));
}

#[tokio::test]
async fn random_quote_is_served() {
    let (app, hits) = TestApp::spawn(ProviderMode::Healthy).await;

    let (status, body) = app.get("/quote").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1386,
            "quote": "It Is Most Pleasant To Commit A Just Action Which Is Disagreeable To Someone Whom One Does Not Like.",
            "author": "Victor Hugo"
        })
    );
    assert_eq!(hits.random(), 1);
}

#[tokio::test]
async fn provider_failures_are_masked() {
    let (app, _) = TestApp::spawn(ProviderMode::Status(418)).await;

    let (status, body) = app.get("/quote").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "unknown error"}));

    let (status, body) = app.post("/quote-game", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "unknown error"}));
}

#[tokio::test]
async fn degraded_mode_refuses_games() {
    let (app, hits) = TestApp::spawn(ProviderMode::Healthy).await;

    let (status, body) = app.get("/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "store": "memory"}));

    app.state.clear_game_store().await;

    let (status, body) = app.post("/quote-game", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"message": "degraded mode"}));
    assert_eq!(hits.random(), 0);

    let (status, body) = app.get("/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "degraded"}));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = TestApp::spawn(ProviderMode::Healthy).await;

    let (status, doc) = app.get("/api-doc/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/quote-game/{id}/answer").is_some());
    assert!(doc["paths"].get("/quote").is_some());
}

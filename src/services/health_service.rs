use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether a game store is installed and answering pings.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = match state.require_game_store().await {
        Ok(store) => store,
        Err(_) => {
            warn!("storage unavailable (degraded mode)");
            return HealthResponse::degraded(None);
        }
    };

    match store.health_check().await {
        Ok(()) => HealthResponse::ok(store.backend()),
        Err(err) => {
            warn!(backend = store.backend(), error = %err, "storage health check failed");
            HealthResponse::degraded(Some(store.backend()))
        }
    }
}

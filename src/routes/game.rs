use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::post,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::game::{QuoteGameResponse, QuoteGameResultResponse, SubmitAnswersRequest},
    error::{AppError, ErrorBody, ServiceError},
    services::quote_service,
    state::SharedState,
};

/// Routes handling quote games.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quote-game", post(create_quote_game))
        .route("/quote-game/{id}/answer", post(submit_answers))
}

/// Generate a new quote game.
#[utoipa::path(
    post,
    path = "/quote-game",
    tag = "quote-game",
    responses(
        (status = 200, description = "Game generated", body = QuoteGameResponse),
        (status = 500, description = "Quote provider failure", body = ErrorBody),
        (status = 503, description = "Degraded mode", body = ErrorBody)
    )
)]
pub async fn create_quote_game(
    State(state): State<SharedState>,
) -> Result<Json<QuoteGameResponse>, AppError> {
    let game = quote_service::create_quote_game(&state).await?;
    Ok(Json(game.into()))
}

/// Submit one author per quote and get the actual authors back.
#[utoipa::path(
    post,
    path = "/quote-game/{id}/answer",
    tag = "quote-game",
    params(("id" = String, Path, description = "Identifier returned when the game was generated")),
    request_body = SubmitAnswersRequest,
    responses(
        (status = 200, description = "Game settled", body = QuoteGameResultResponse),
        (status = 404, description = "Unknown, expired or completed game", body = ErrorBody),
        (status = 422, description = "Answers do not match the game", body = ErrorBody),
        (status = 500, description = "Quote provider failure", body = ErrorBody),
        (status = 503, description = "Degraded mode", body = ErrorBody)
    )
)]
pub async fn submit_answers(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<Json<QuoteGameResultResponse>, AppError> {
    // A malformed id can't name a stored game.
    let id = Uuid::parse_str(&id).map_err(|_| ServiceError::QuoteGameNotFound)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let result = quote_service::submit_answers(&state, id, payload.into_answers()).await?;
    Ok(Json(result.into()))
}

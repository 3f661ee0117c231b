//! Quote and quote game flows: fetch-then-store when a game is generated,
//! validate-then-fetch-then-settle when answers come in.

use std::time::SystemTime;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::QuoteGameEntity,
    error::ServiceError,
    state::{
        SharedState,
        quote_game::{
            QUOTES_PER_GAME, Quote, QuoteGame, QuoteGameAnswers, QuoteGameResult,
            ensure_answerable,
        },
    },
};

/// Fetch a single random quote.
pub async fn random_quote(state: &SharedState) -> Result<Quote, ServiceError> {
    let quotes = state.quote_source().random_quotes(1).await?;
    quotes
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Internal("quote source returned no quotes".into()))
}

/// Generate a new game from random quotes and persist it.
pub async fn create_quote_game(state: &SharedState) -> Result<QuoteGame, ServiceError> {
    let store = state.require_game_store().await?;
    let quotes = state.quote_source().random_quotes(QUOTES_PER_GAME).await?;

    let game = QuoteGame::from_quotes(quotes, SystemTime::now(), state.config().answer_window)?;
    store.insert_game(QuoteGameEntity::from(&game)).await?;

    info!(game_id = %game.id, quote_ids = ?game.quote_ids(), "quote game created");
    Ok(game)
}

/// Score the answers for a game and record the outcome.
///
/// Unknown, expired and already completed games all surface as
/// [`ServiceError::QuoteGameNotFound`].
pub async fn submit_answers(
    state: &SharedState,
    id: Uuid,
    answers: QuoteGameAnswers,
) -> Result<QuoteGameResult, ServiceError> {
    answers.ensure_complete()?;

    let store = state.require_game_store().await?;
    let Some(game) = store.find_game(id).await? else {
        debug!(game_id = %id, "answers submitted for unknown game");
        return Err(ServiceError::QuoteGameNotFound);
    };

    ensure_answerable(&game, state.config().answer_window, SystemTime::now())?;
    answers.ensure_matches(&game.quote_ids)?;

    let quotes = state
        .quote_source()
        .quotes(game.quote_ids.to_vec())
        .await?;
    let result = QuoteGameResult::score(id, &game.quote_ids, &quotes, &answers)?;

    if !store
        .settle_game(id, result.settlement(SystemTime::now()))
        .await?
    {
        debug!(game_id = %id, "game settled concurrently");
        return Err(ServiceError::QuoteGameNotFound);
    }

    info!(
        game_id = %id,
        correct = result.correct_count(),
        "quote game settled"
    );
    Ok(result)
}

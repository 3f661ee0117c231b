use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::quote::QuoteResponse, error::AppError, services::quote_service, state::SharedState,
};

/// Routes serving plain quotes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/quote", get(random_quote))
}

/// Return a single random quote, author included.
#[utoipa::path(
    get,
    path = "/quote",
    tag = "quote",
    responses(
        (status = 200, description = "Random quote", body = QuoteResponse),
        (status = 500, description = "Quote provider failure", body = crate::error::ErrorBody)
    )
)]
pub async fn random_quote(
    State(state): State<SharedState>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = quote_service::random_quote(&state).await?;
    Ok(Json(quote.into()))
}

use serde::Deserialize;

use crate::state::quote_game::Quote;

/// Quote as returned by the dummyjson quote endpoints.
#[derive(Debug, Deserialize)]
pub struct QuotePayload {
    pub id: i64,
    pub quote: String,
    pub author: String,
}

impl From<QuotePayload> for Quote {
    fn from(payload: QuotePayload) -> Self {
        Self {
            id: payload.id,
            quote: payload.quote,
            author: payload.author,
        }
    }
}

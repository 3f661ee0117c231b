use serde::Serialize;
use utoipa::ToSchema;

use crate::state::quote_game::{Quote, QuoteWithoutAuthor};

/// A basic quote.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub id: i64,
    pub quote: String,
    pub author: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            quote: quote.quote,
            author: quote.author,
        }
    }
}

/// Quote used by the quote game, author withheld.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteWithoutAuthorResponse {
    pub id: i64,
    pub quote: String,
}

impl From<QuoteWithoutAuthor> for QuoteWithoutAuthorResponse {
    fn from(quote: QuoteWithoutAuthor) -> Self {
        Self {
            id: quote.id,
            quote: quote.quote,
        }
    }
}

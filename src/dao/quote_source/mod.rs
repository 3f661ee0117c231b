//! Access to the external quote provider.

mod dummyjson;
mod error;
mod models;

use std::collections::HashMap;

use futures::future::BoxFuture;

pub use dummyjson::DummyJsonQuoteSource;
pub use error::{QuoteSourceError, QuoteSourceResult};

use crate::state::quote_game::Quote;

/// Smallest number of random quotes the provider hands out per request.
pub const MIN_RANDOM_QUOTES: usize = 1;
/// Largest number of random quotes the provider hands out per request.
pub const MAX_RANDOM_QUOTES: usize = 10;

/// Source of quotes, either random or looked up by id.
pub trait QuoteSource: Send + Sync {
    /// Fetch `amount` random quotes, between [`MIN_RANDOM_QUOTES`] and [`MAX_RANDOM_QUOTES`].
    fn random_quotes(&self, amount: usize) -> BoxFuture<'static, QuoteSourceResult<Vec<Quote>>>;
    fn quote(&self, id: i64) -> BoxFuture<'static, QuoteSourceResult<Quote>>;
    /// Fetch every quote in `ids`, stopping at the first failure.
    fn quotes(&self, ids: Vec<i64>) -> BoxFuture<'static, QuoteSourceResult<HashMap<i64, Quote>>>;
}

/// Validate a random quote amount before anything is sent.
pub(crate) fn check_amount(amount: usize) -> QuoteSourceResult<()> {
    if (MIN_RANDOM_QUOTES..=MAX_RANDOM_QUOTES).contains(&amount) {
        Ok(())
    } else {
        Err(QuoteSourceError::AmountOutOfRange { amount })
    }
}

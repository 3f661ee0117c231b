use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::{
    QuoteSource, check_amount,
    error::{QuoteSourceError, QuoteSourceResult},
    models::QuotePayload,
};
use crate::state::quote_game::Quote;

/// HTTP client for dummyjson-compatible quote APIs.
#[derive(Clone)]
pub struct DummyJsonQuoteSource {
    client: Client,
    base_url: Arc<str>,
}

impl DummyJsonQuoteSource {
    /// Build a client targeting `base_url` with the given per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> QuoteSourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| QuoteSourceError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// A 404 resolves to `Ok(None)` so callers can decide what missing means.
    async fn get_json<T>(&self, path: &str) -> QuoteSourceResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "requesting quote provider");

        let response = self.client.get(&url).send().await.map_err(|source| {
            error!(%url, error = %source, "quote provider request failed");
            QuoteSourceError::RequestSend {
                path: path.to_string(),
                source,
            }
        })?;

        match response.status() {
            StatusCode::OK => response.json::<T>().await.map(Some).map_err(|source| {
                error!(%url, error = %source, "failed to decode quote provider response");
                QuoteSourceError::DecodeResponse {
                    path: path.to_string(),
                    source,
                }
            }),
            StatusCode::NOT_FOUND => Ok(None),
            other => {
                error!(%url, status = other.as_u16(), "unexpected status code from quote provider");
                Err(QuoteSourceError::RequestStatus {
                    path: path.to_string(),
                    status: other.as_u16(),
                })
            }
        }
    }

    async fn random_quotes(&self, amount: usize) -> QuoteSourceResult<Vec<Quote>> {
        check_amount(amount)?;
        let path = format!("quotes/random/{amount}");
        match self.get_json::<Vec<QuotePayload>>(&path).await? {
            Some(quotes) => Ok(quotes.into_iter().map(Quote::from).collect()),
            None => Err(QuoteSourceError::RequestStatus {
                path,
                status: StatusCode::NOT_FOUND.as_u16(),
            }),
        }
    }

    async fn quote(&self, id: i64) -> QuoteSourceResult<Quote> {
        let path = format!("quotes/{id}");
        self.get_json::<QuotePayload>(&path)
            .await?
            .map(Quote::from)
            .ok_or(QuoteSourceError::UnknownQuote { id })
    }

    async fn quotes(&self, ids: Vec<i64>) -> QuoteSourceResult<HashMap<i64, Quote>> {
        let mut quotes = HashMap::with_capacity(ids.len());
        for id in ids {
            let quote = self.quote(id).await?;
            quotes.insert(id, quote);
        }
        Ok(quotes)
    }
}

impl QuoteSource for DummyJsonQuoteSource {
    fn random_quotes(&self, amount: usize) -> BoxFuture<'static, QuoteSourceResult<Vec<Quote>>> {
        let source = self.clone();
        Box::pin(async move { source.random_quotes(amount).await })
    }

    fn quote(&self, id: i64) -> BoxFuture<'static, QuoteSourceResult<Quote>> {
        let source = self.clone();
        Box::pin(async move { source.quote(id).await })
    }

    fn quotes(&self, ids: Vec<i64>) -> BoxFuture<'static, QuoteSourceResult<HashMap<i64, Quote>>> {
        let source = self.clone();
        Box::pin(async move { source.quotes(ids).await })
    }
}

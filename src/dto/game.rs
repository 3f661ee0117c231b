use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_system_time,
        quote::QuoteWithoutAuthorResponse,
        validation::{duplicate_quote_id, validate_author},
    },
    state::quote_game::{QuoteGame, QuoteGameAnswers, QuoteGameResult},
};

/// A new quote game: match every quote with one of the authors.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteGameResponse {
    pub id: Uuid,
    pub quotes: Vec<QuoteWithoutAuthorResponse>,
    pub authors: Vec<String>,
    /// RFC 3339 instant after which answers are refused.
    pub expires_at: String,
}

impl From<QuoteGame> for QuoteGameResponse {
    fn from(game: QuoteGame) -> Self {
        Self {
            id: game.id,
            quotes: game.quotes.into_iter().map(Into::into).collect(),
            authors: game.authors,
            expires_at: format_system_time(game.expires_at),
        }
    }
}

/// An answer to the quote game.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuoteGameAnswerInput {
    pub id: i64,
    pub author: String,
}

/// Body of `POST /quote-game/{id}/answer`: one answer per quote.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SubmitAnswersRequest(pub Vec<QuoteGameAnswerInput>);

impl Validate for SubmitAnswersRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut seen_ids = HashSet::new();

        for answer in &self.0 {
            if let Err(e) = validate_author(&answer.author) {
                errors.add("author", e);
            }
            if !seen_ids.insert(answer.id) {
                errors.add("id", duplicate_quote_id(answer.id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl SubmitAnswersRequest {
    pub fn into_answers(self) -> QuoteGameAnswers {
        self.0
            .into_iter()
            .map(|answer| (answer.id, answer.author))
            .collect()
    }
}

/// Outcome for a single quote.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteGameAnswerResult {
    pub id: i64,
    pub correct: bool,
    pub actual_author: String,
}

/// The result of a quote game.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteGameResultResponse {
    pub id: Uuid,
    pub answers: Vec<QuoteGameAnswerResult>,
}

impl From<QuoteGameResult> for QuoteGameResultResponse {
    fn from(result: QuoteGameResult) -> Self {
        Self {
            id: result.id,
            answers: result
                .answers
                .into_iter()
                .map(|answer| QuoteGameAnswerResult {
                    id: answer.quote.id,
                    correct: answer.correct,
                    actual_author: answer.quote.author,
                })
                .collect(),
        }
    }
}

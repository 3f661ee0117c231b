//! Quote game domain: building a round from fetched quotes, checking that a
//! stored round still accepts answers, and scoring a submitted answer set.

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use thiserror::Error;
use uuid::Uuid;

use crate::dao::models::{GameSettlement, QuoteGameEntity};

/// Number of quotes that make up a single game.
pub const QUOTES_PER_GAME: usize = 3;

/// A quote as served by the external quote provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub quote: String,
    pub author: String,
}

/// Quote shown to the player while the author is withheld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteWithoutAuthor {
    pub id: i64,
    pub quote: String,
}

/// Failures raised by the quote game rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteGameError {
    #[error("number of quotes should be 3. Given: {0}")]
    WrongQuoteCount(usize),
    /// Unknown, expired and completed games are indistinguishable to players.
    #[error("quote_game_id_not_found")]
    NotFound,
    #[error("invalid_quote_id")]
    InvalidQuoteId,
    #[error("quote `{0}` missing from fetched quotes")]
    MissingQuote(i64),
}

/// A freshly generated game: quotes without authors plus the authors to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteGame {
    pub id: Uuid,
    pub quotes: Vec<QuoteWithoutAuthor>,
    pub authors: Vec<String>,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

impl QuoteGame {
    /// Split the quotes from their authors and sort both lists so the order of
    /// the authors gives nothing away.
    ///
    /// Quotes are ordered by their text and authors alphabetically. The game id
    /// is a random UUID so players cannot reach each other's games by guessing.
    pub fn from_quotes(
        quotes: Vec<Quote>,
        created_at: SystemTime,
        answer_window: Duration,
    ) -> Result<Self, QuoteGameError> {
        if quotes.len() != QUOTES_PER_GAME {
            return Err(QuoteGameError::WrongQuoteCount(quotes.len()));
        }

        let (mut without_author, mut authors): (Vec<_>, Vec<_>) = quotes
            .into_iter()
            .map(|quote| {
                (
                    QuoteWithoutAuthor {
                        id: quote.id,
                        quote: quote.quote,
                    },
                    quote.author,
                )
            })
            .unzip();

        without_author.sort_by(|a, b| a.quote.cmp(&b.quote));
        authors.sort();

        Ok(Self {
            id: Uuid::new_v4(),
            quotes: without_author,
            authors,
            created_at,
            expires_at: created_at + answer_window,
        })
    }

    /// Quote ids in the order they are presented to the player.
    pub fn quote_ids(&self) -> [i64; QUOTES_PER_GAME] {
        let mut ids = [0; QUOTES_PER_GAME];
        for (slot, quote) in ids.iter_mut().zip(&self.quotes) {
            *slot = quote.id;
        }
        ids
    }
}

impl From<&QuoteGame> for QuoteGameEntity {
    fn from(game: &QuoteGame) -> Self {
        Self {
            id: game.id,
            quote_ids: game.quote_ids(),
            created_at: game.created_at,
            completed_at: None,
            correct: None,
        }
    }
}

/// Answers submitted by a player, keyed by quote id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteGameAnswers(HashMap<i64, String>);

impl QuoteGameAnswers {
    pub fn new(answers: HashMap<i64, String>) -> Self {
        Self(answers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Author guessed for the given quote, if any.
    pub fn author_for(&self, quote_id: i64) -> Option<&str> {
        self.0.get(&quote_id).map(String::as_str)
    }

    /// Reject answer sets that do not hold exactly one answer per game quote.
    pub fn ensure_complete(&self) -> Result<(), QuoteGameError> {
        if self.0.len() != QUOTES_PER_GAME {
            return Err(QuoteGameError::InvalidQuoteId);
        }
        Ok(())
    }

    /// Reject answer sets whose quote ids differ from the stored ones.
    pub fn ensure_matches(&self, quote_ids: &[i64; QUOTES_PER_GAME]) -> Result<(), QuoteGameError> {
        self.ensure_complete()?;
        if quote_ids.iter().all(|id| self.0.contains_key(id)) {
            Ok(())
        } else {
            Err(QuoteGameError::InvalidQuoteId)
        }
    }
}

impl FromIterator<(i64, String)> for QuoteGameAnswers {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check that a stored game can still be answered at `now`.
pub fn ensure_answerable(
    game: &QuoteGameEntity,
    answer_window: Duration,
    now: SystemTime,
) -> Result<(), QuoteGameError> {
    if game.completed_at.is_some() {
        return Err(QuoteGameError::NotFound);
    }

    let expired = game
        .created_at
        .checked_add(answer_window)
        .is_some_and(|deadline| now > deadline);
    if expired {
        return Err(QuoteGameError::NotFound);
    }

    Ok(())
}

/// Outcome for a single quote once the game is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteGameActualAnswer {
    pub quote: Quote,
    pub correct: bool,
}

/// Scored game, answers in the stored game order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteGameResult {
    pub id: Uuid,
    pub answers: Vec<QuoteGameActualAnswer>,
}

impl QuoteGameResult {
    /// Compare every answer against the actual author.
    pub fn score(
        id: Uuid,
        quote_ids: &[i64; QUOTES_PER_GAME],
        quotes: &HashMap<i64, Quote>,
        answers: &QuoteGameAnswers,
    ) -> Result<Self, QuoteGameError> {
        let answers = quote_ids
            .iter()
            .map(|quote_id| {
                let quote = quotes
                    .get(quote_id)
                    .ok_or(QuoteGameError::MissingQuote(*quote_id))?;
                let correct = answers.author_for(*quote_id) == Some(quote.author.as_str());
                Ok(QuoteGameActualAnswer {
                    quote: quote.clone(),
                    correct,
                })
            })
            .collect::<Result<Vec<_>, QuoteGameError>>()?;

        Ok(Self { id, answers })
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.correct).count()
    }

    /// Build the record update that marks the game as completed.
    pub fn settlement(&self, completed_at: SystemTime) -> GameSettlement {
        let mut correct = [false; QUOTES_PER_GAME];
        for (slot, answer) in correct.iter_mut().zip(&self.answers) {
            *slot = answer.correct;
        }
        GameSettlement {
            correct,
            completed_at,
        }
    }
}

use std::time::SystemTime;
use uuid::Uuid;

use crate::state::quote_game::QUOTES_PER_GAME;

/// Persisted state of a quote game, regardless of the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteGameEntity {
    /// Random identifier handed to the player.
    pub id: Uuid,
    /// Quote ids in the order they were presented.
    pub quote_ids: [i64; QUOTES_PER_GAME],
    /// When the game was generated; starts the answer window.
    pub created_at: SystemTime,
    /// Set once, when the answers are settled.
    pub completed_at: Option<SystemTime>,
    /// Per-quote correctness, aligned with `quote_ids`.
    pub correct: Option<[bool; QUOTES_PER_GAME]>,
}

/// Update applied to a game when its answers are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettlement {
    pub correct: [bool; QUOTES_PER_GAME],
    pub completed_at: SystemTime,
}

impl QuoteGameEntity {
    /// Apply a settlement unless the game has already been completed.
    ///
    /// Returns `false` and leaves the entity untouched when it was completed before.
    pub fn settle(&mut self, settlement: GameSettlement) -> bool {
        if self.completed_at.is_some() {
            return false;
        }
        self.completed_at = Some(settlement.completed_at);
        self.correct = Some(settlement.correct);
        true
    }
}

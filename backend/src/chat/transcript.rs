//! Session transcript
//!
//! Ordered, append-only history of one session. Insertion order is display
//! order; nothing is ever reordered or removed.

use crate::chat::models::Turn;

/// Ordered turn history of a single session
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a turn to the end
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

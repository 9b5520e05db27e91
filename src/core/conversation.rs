use super::types::{Role, Turn};

/// Append-only, ordered log of turns. Append order is display order.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a turn and returns its index.
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len() - 1
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub const fn latest_index(&self) -> Option<usize> {
        self.turns.len().checked_sub(1)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Turn> {
        self.turns.last()
    }

    #[must_use]
    pub fn latest_assistant_index(&self) -> Option<usize> {
        self.turns
            .iter()
            .rposition(|turn| turn.role() == Role::Assistant)
    }
}

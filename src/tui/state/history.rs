use std::collections::VecDeque;

const MAX_HISTORY_SIZE: usize = 100;

/// Previously sent prompts, recalled with Up/Down. Whatever was in the input
/// before browsing started is kept as a draft and handed back when browsing
/// moves past the newest entry.
#[derive(Debug, Clone, Default)]
pub struct InputHistory {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    draft: Option<String>,
}

impl InputHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            draft: None,
        }
    }

    pub fn push(&mut self, input: String) {
        self.cursor = None;
        self.draft = None;

        if input.trim().is_empty() || self.entries.back() == Some(&input) {
            return;
        }

        if self.entries.len() == MAX_HISTORY_SIZE {
            self.entries.pop_front();
        }
        self.entries.push_back(input);
    }

    /// Steps to an older entry. `current` is remembered as the draft when
    /// browsing starts.
    pub fn prev(&mut self, current: &str) -> Option<String> {
        let newest = self.entries.len().checked_sub(1)?;

        let index = match self.cursor {
            None => {
                self.draft = Some(current.to_string());
                newest
            }
            Some(i) => i.saturating_sub(1),
        };

        self.cursor = Some(index);
        self.entries.get(index).cloned()
    }

    /// Steps to a newer entry, or back to the draft after the newest one.
    /// Returns `None` when not browsing.
    pub fn next(&mut self) -> Option<String> {
        let i = self.cursor?;

        if i + 1 >= self.entries.len() {
            self.cursor = None;
            return Some(self.draft.take().unwrap_or_default());
        }

        self.cursor = Some(i + 1);
        self.entries.get(i + 1).cloned()
    }

    #[must_use]
    pub const fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

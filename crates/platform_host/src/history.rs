//! Linear back/forward folder navigation history.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Navigation precondition failures for [`NavigationHistory`].
pub enum HistoryError {
    /// [`NavigationHistory::back`] was called while no earlier entry exists.
    #[error("cannot go back")]
    CannotGoBack,
    /// [`NavigationHistory::forward`] was called while no later entry exists.
    #[error("cannot go forward")]
    CannotGoForward,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Browser-style history of visited folders with a cursor on the displayed one.
///
/// Pushing while the cursor sits behind the end discards the forward branch before appending,
/// so the history never forks.
pub struct NavigationHistory {
    visited: Vec<String>,
    position: Option<usize>,
}

impl NavigationHistory {
    /// Creates an empty history with no current folder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path` as the new current folder, truncating any forward entries.
    pub fn push(&mut self, path: impl Into<String>) {
        if let Some(position) = self.position {
            self.visited.truncate(position + 1);
        }
        self.visited.push(path.into());
        self.position = Some(self.visited.len() - 1);
    }

    /// Returns `true` when at least one earlier entry exists.
    pub fn can_go_back(&self) -> bool {
        matches!(self.position, Some(position) if position >= 1)
    }

    /// Moves the cursor one entry back and returns the folder now current.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CannotGoBack`] when [`Self::can_go_back`] is `false`.
    pub fn back(&mut self) -> Result<&str, HistoryError> {
        match self.position {
            Some(position) if position >= 1 => {
                self.position = Some(position - 1);
                Ok(&self.visited[position - 1])
            }
            _ => Err(HistoryError::CannotGoBack),
        }
    }

    /// Returns `true` when at least one later entry exists.
    pub fn can_go_forward(&self) -> bool {
        matches!(self.position, Some(position) if position + 1 < self.visited.len())
    }

    /// Moves the cursor one entry forward and returns the folder now current.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CannotGoForward`] when [`Self::can_go_forward`] is `false`.
    pub fn forward(&mut self) -> Result<&str, HistoryError> {
        match self.position {
            Some(position) if position + 1 < self.visited.len() => {
                self.position = Some(position + 1);
                Ok(&self.visited[position + 1])
            }
            _ => Err(HistoryError::CannotGoForward),
        }
    }

    /// Returns the folder under the cursor, if any.
    pub fn current(&self) -> Option<&str> {
        self.position
            .and_then(|position| self.visited.get(position))
            .map(String::as_str)
    }

    /// Returns the cursor index; `None` only while the history is empty.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns every retained entry, oldest first.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Returns `true` before the first push.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

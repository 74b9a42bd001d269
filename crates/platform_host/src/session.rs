//! Process-lifetime browsing state: the host's selected-folder cell and the renderer's
//! navigation session.

use std::{cell::RefCell, rc::Rc};

use crate::history::{HistoryError, NavigationHistory};

#[derive(Debug, Clone, Default)]
/// Shared cell holding the folder currently selected for display.
///
/// Clones share the same value. Constructed once by the host context and never torn down.
pub struct SelectedFolderCell {
    inner: Rc<RefCell<String>>,
}

impl SelectedFolderCell {
    /// Creates a cell holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial.into())),
        }
    }

    /// Returns the selected folder.
    pub fn get(&self) -> String {
        self.inner.borrow().clone()
    }

    /// Replaces the selected folder.
    pub fn set(&self, path: impl Into<String>) {
        *self.inner.borrow_mut() = path.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Generation number identifying one navigation's listing request.
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw generation number.
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
/// Renderer-side navigation state: folder history plus a monotonic request generation.
///
/// Every navigation issues a fresh [`RequestToken`]. Listing results carrying an older token are
/// stale and must be dropped, so a slow read can never replace a newer folder's display.
pub struct BrowserSession {
    history: NavigationHistory,
    generation: u64,
}

impl BrowserSession {
    /// Creates a session with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigates to `path`, recording it in history.
    pub fn open(&mut self, path: impl Into<String>) -> RequestToken {
        self.history.push(path);
        self.next_token()
    }

    /// Steps back in history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CannotGoBack`] when there is no earlier folder; no token is issued.
    pub fn go_back(&mut self) -> Result<(String, RequestToken), HistoryError> {
        let path = self.history.back()?.to_string();
        Ok((path, self.next_token()))
    }

    /// Steps forward in history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CannotGoForward`] when there is no later folder; no token is
    /// issued.
    pub fn go_forward(&mut self) -> Result<(String, RequestToken), HistoryError> {
        let path = self.history.forward()?.to_string();
        Ok((path, self.next_token()))
    }

    /// Re-issues a request for the current folder, e.g. after the column selection changed.
    pub fn reload(&mut self) -> Option<(String, RequestToken)> {
        let path = self.history.current()?.to_string();
        Some((path, self.next_token()))
    }

    /// Returns `true` when `token` belongs to the most recent navigation.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Read access to the navigation history.
    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    fn next_token(&mut self) -> RequestToken {
        self.generation = self.generation.wrapping_add(1);
        RequestToken(self.generation)
    }
}

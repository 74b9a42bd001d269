//! Typed folder-browser settings layered over a [`SettingsStore`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::prefs::{load_setting_with, save_setting_with, SettingsStore};
use crate::fs::types::ColumnSelection;

/// Settings key holding the favorite folder list.
pub const FAVORITES_KEY: &str = "favorites";
/// Settings key holding the folder shown at startup.
pub const INITIAL_LOAD_FOLDER_KEY: &str = "initialLoadFolder";
/// Settings key holding the visible-column selection.
pub const VISIBLE_COLUMNS_KEY: &str = "visibleColumns";
/// Home-relative folders seeded as favorites on first run.
pub const DEFAULT_FAVORITE_FOLDERS: [&str; 5] =
    ["Desktop", "Documents", "Downloads", "Pictures", "Videos"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Favorite folders in insertion order, without duplicates.
pub struct FavoritesList(Vec<String>);

impl FavoritesList {
    /// Builds a list, keeping the first occurrence of each path.
    pub fn new(paths: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::default();
        for path in paths {
            list.add(path);
        }
        list
    }

    /// Appends `path` unless already present; returns whether it was added.
    pub fn add(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.0.push(path);
        true
    }

    /// Removes `path` if present; returns whether it was removed.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != path);
        self.0.len() != before
    }

    /// Returns `true` when `path` is a favorite.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|existing| existing == path)
    }

    /// Favorite paths in insertion order.
    pub fn paths(&self) -> &[String] {
        &self.0
    }

    /// Consumes the list and returns its paths.
    pub fn into_paths(self) -> Vec<String> {
        self.0
    }
}

/// Returns the first-run favorites for `home`.
pub fn default_favorites(home: &Path) -> FavoritesList {
    FavoritesList::new(
        DEFAULT_FAVORITE_FOLDERS
            .iter()
            .map(|name| home.join(name).to_string_lossy().into_owned()),
    )
}

#[derive(Debug, Clone)]
/// Folder-browser settings with first-run defaults derived from the user's home directory.
pub struct BrowserSettings<S> {
    store: S,
    home: PathBuf,
}

impl<S: SettingsStore> BrowserSettings<S> {
    /// Wraps `store`; defaults are computed relative to `home`.
    pub fn new(store: S, home: impl Into<PathBuf>) -> Self {
        Self {
            store,
            home: home.into(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes defaults for every key that has no stored value yet.
    ///
    /// Existing values are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails to load or save.
    pub async fn seed_defaults(&self) -> Result<(), String> {
        if self.store.load_raw(FAVORITES_KEY).await?.is_none() {
            save_setting_with(&self.store, FAVORITES_KEY, &default_favorites(&self.home)).await?;
        }
        if self.store.load_raw(INITIAL_LOAD_FOLDER_KEY).await?.is_none() {
            save_setting_with(&self.store, INITIAL_LOAD_FOLDER_KEY, &self.home_string()).await?;
        }
        if self.store.load_raw(VISIBLE_COLUMNS_KEY).await?.is_none() {
            save_setting_with(
                &self.store,
                VISIBLE_COLUMNS_KEY,
                &ColumnSelection::default(),
            )
            .await?;
        }
        Ok(())
    }

    /// Returns the favorite folders, or the first-run defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or the stored value is malformed.
    pub async fn favorites(&self) -> Result<FavoritesList, String> {
        Ok(load_setting_with(&self.store, FAVORITES_KEY)
            .await?
            .unwrap_or_else(|| default_favorites(&self.home)))
    }

    /// Adds a favorite folder; returns `false` when it was already present.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn add_favorite(&self, path: &str) -> Result<bool, String> {
        let mut favorites = self.favorites().await?;
        let added = favorites.add(path);
        if added {
            save_setting_with(&self.store, FAVORITES_KEY, &favorites).await?;
        }
        Ok(added)
    }

    /// Removes a favorite folder; returns `false` when it was not present.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn remove_favorite(&self, path: &str) -> Result<bool, String> {
        let mut favorites = self.favorites().await?;
        let removed = favorites.remove(path);
        if removed {
            save_setting_with(&self.store, FAVORITES_KEY, &favorites).await?;
        }
        Ok(removed)
    }

    /// Returns the folder shown at startup, defaulting to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or the stored value is malformed.
    pub async fn initial_load_folder(&self) -> Result<String, String> {
        Ok(load_setting_with(&self.store, INITIAL_LOAD_FOLDER_KEY)
            .await?
            .unwrap_or_else(|| self.home_string()))
    }

    /// Persists the folder shown at startup.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn set_initial_load_folder(&self, path: &str) -> Result<(), String> {
        save_setting_with(&self.store, INITIAL_LOAD_FOLDER_KEY, path).await
    }

    /// Returns the visible columns, defaulting to name/size/type/date modified.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or the stored value is malformed.
    pub async fn visible_columns(&self) -> Result<ColumnSelection, String> {
        Ok(load_setting_with(&self.store, VISIBLE_COLUMNS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Persists the visible columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn set_visible_columns(&self, columns: &ColumnSelection) -> Result<(), String> {
        save_setting_with(&self.store, VISIBLE_COLUMNS_KEY, columns).await
    }

    fn home_string(&self) -> String {
        self.home.to_string_lossy().into_owned()
    }
}

//! Privileged folder-browser command contract consumed by the renderer.

use std::{future::Future, pin::Pin};

use super::types::{ColumnSelection, FileSystemEntryMetadata};

/// Object-safe boxed future used by [`FolderBrowserService`] async methods.
pub type FolderBrowserFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Named operations the renderer may invoke on the privileged host process.
///
/// The renderer never touches the filesystem or the settings store directly; every read and
/// write crosses this boundary.
pub trait FolderBrowserService {
    /// Lists the immediate children of `path` with resolved metadata.
    fn list_dir_with_metadata<'a>(
        &'a self,
        path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<Vec<FileSystemEntryMetadata>, String>>;

    /// Returns the host platform's path separator.
    fn path_separator<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>>;

    /// Returns the folder currently selected for display.
    fn selected_folder<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>>;

    /// Replaces the folder currently selected for display.
    fn set_selected_folder<'a>(
        &'a self,
        path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<(), String>>;

    /// Returns the persisted favorite folders in insertion order.
    fn favorites<'a>(&'a self) -> FolderBrowserFuture<'a, Result<Vec<String>, String>>;

    /// Appends a favorite folder unless it is already present.
    fn add_favorite<'a>(&'a self, path: &'a str) -> FolderBrowserFuture<'a, Result<(), String>>;

    /// Removes a favorite folder if present.
    fn remove_favorite<'a>(&'a self, path: &'a str)
        -> FolderBrowserFuture<'a, Result<(), String>>;

    /// Returns the persisted visible-column selection.
    fn visible_columns<'a>(&'a self) -> FolderBrowserFuture<'a, Result<ColumnSelection, String>>;

    /// Persists a new visible-column selection.
    fn set_visible_columns<'a>(
        &'a self,
        columns: &'a ColumnSelection,
    ) -> FolderBrowserFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op folder-browser service for hosts without a privileged process and baseline tests.
pub struct NoopFolderBrowserService;

impl NoopFolderBrowserService {
    fn unsupported_error(op: &str) -> String {
        format!("folder browser host unavailable: {op}")
    }
}

impl FolderBrowserService for NoopFolderBrowserService {
    fn list_dir_with_metadata<'a>(
        &'a self,
        _path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<Vec<FileSystemEntryMetadata>, String>> {
        Box::pin(async { Err(Self::unsupported_error("list_dir_with_metadata")) })
    }

    fn path_separator<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>> {
        Box::pin(async { Ok(std::path::MAIN_SEPARATOR.to_string()) })
    }

    fn selected_folder<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>> {
        Box::pin(async { Err(Self::unsupported_error("selected_folder")) })
    }

    fn set_selected_folder<'a>(
        &'a self,
        _path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("set_selected_folder")) })
    }

    fn favorites<'a>(&'a self) -> FolderBrowserFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn add_favorite<'a>(&'a self, _path: &'a str) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("add_favorite")) })
    }

    fn remove_favorite<'a>(
        &'a self,
        _path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("remove_favorite")) })
    }

    fn visible_columns<'a>(&'a self) -> FolderBrowserFuture<'a, Result<ColumnSelection, String>> {
        Box::pin(async { Ok(ColumnSelection::default()) })
    }

    fn set_visible_columns<'a>(
        &'a self,
        _columns: &'a ColumnSelection,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("set_visible_columns")) })
    }
}

//! Privileged command boundary: the host context and its named-command dispatcher.

use std::path::{Path, PathBuf};

use platform_host::{
    BrowserSettings, ColumnSelection, FileSystemEntryMetadata, FolderBrowserFuture,
    FolderBrowserService, IdentityResolver, SelectedFolderCell, SettingsStore,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::explorer::NativeMetadataResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Named operations the renderer may invoke across the trust boundary.
pub enum HostCommand {
    /// `fs_list_dir_with_metadata { path }`
    ListDirWithMetadata,
    /// `fs_path_separator`
    PathSeparator,
    /// `app_get_selected_folder`
    GetSelectedFolder,
    /// `app_set_selected_folder { path }`
    SetSelectedFolder,
    /// `app_get_favorites`
    GetFavorites,
    /// `app_add_favorite { path }`
    AddFavorite,
    /// `app_remove_favorite { path }`
    RemoveFavorite,
    /// `app_get_visible_columns`
    GetVisibleColumns,
    /// `app_set_visible_columns { columns }`
    SetVisibleColumns,
}

impl HostCommand {
    /// Every command the dispatcher accepts.
    pub const ALL: [HostCommand; 9] = [
        Self::ListDirWithMetadata,
        Self::PathSeparator,
        Self::GetSelectedFolder,
        Self::SetSelectedFolder,
        Self::GetFavorites,
        Self::AddFavorite,
        Self::RemoveFavorite,
        Self::GetVisibleColumns,
        Self::SetVisibleColumns,
    ];

    /// Wire name of the command.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListDirWithMetadata => "fs_list_dir_with_metadata",
            Self::PathSeparator => "fs_path_separator",
            Self::GetSelectedFolder => "app_get_selected_folder",
            Self::SetSelectedFolder => "app_set_selected_folder",
            Self::GetFavorites => "app_get_favorites",
            Self::AddFavorite => "app_add_favorite",
            Self::RemoveFavorite => "app_remove_favorite",
            Self::GetVisibleColumns => "app_get_visible_columns",
            Self::SetVisibleColumns => "app_set_visible_columns",
        }
    }

    /// Looks a command up by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

#[derive(Debug, Deserialize)]
struct PathArgs {
    path: String,
}

#[derive(Debug, Deserialize)]
struct ColumnsArgs {
    columns: ColumnSelection,
}

fn parse_args<T: DeserializeOwned>(command: HostCommand, args: Value) -> Result<T, String> {
    serde_json::from_value(args)
        .map_err(|err| format!("invalid arguments for `{}`: {err}", command.name()))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|err| format!("failed to serialize response: {err}"))
}

/// Privileged-process state: persisted settings, the selected-folder cell and the native
/// metadata resolver.
///
/// Built once at startup with [`HostContext::init`] and kept for the process lifetime.
pub struct HostContext<S, R> {
    settings: BrowserSettings<S>,
    selected: SelectedFolderCell,
    resolver: NativeMetadataResolver<R>,
}

impl<S: SettingsStore, R: IdentityResolver> HostContext<S, R> {
    /// Seeds first-run defaults into `store` and selects the configured initial folder.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings store cannot be read or written.
    pub async fn init(store: S, home: impl Into<PathBuf>, identity: R) -> Result<Self, String> {
        let settings = BrowserSettings::new(store, home);
        settings.seed_defaults().await?;
        let initial = settings.initial_load_folder().await?;
        debug!(initial_folder = %initial, "host context initialised");
        Ok(Self {
            settings,
            selected: SelectedFolderCell::new(initial),
            resolver: NativeMetadataResolver::new(identity),
        })
    }

    /// Typed settings backing this context.
    pub fn settings(&self) -> &BrowserSettings<S> {
        &self.settings
    }

    /// Shared handle to the selected-folder cell.
    pub fn selected_folder_cell(&self) -> SelectedFolderCell {
        self.selected.clone()
    }

    /// Executes a named command with JSON arguments and returns its JSON result.
    ///
    /// Commands without a result return `null`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, malformed arguments, or a failed operation.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, String> {
        let command =
            HostCommand::from_name(name).ok_or_else(|| format!("unknown host command `{name}`"))?;
        match command {
            HostCommand::ListDirWithMetadata => {
                let args: PathArgs = parse_args(command, args)?;
                to_json(self.list_dir_with_metadata(&args.path).await?)
            }
            HostCommand::PathSeparator => to_json(self.path_separator().await?),
            HostCommand::GetSelectedFolder => to_json(self.selected_folder().await?),
            HostCommand::SetSelectedFolder => {
                let args: PathArgs = parse_args(command, args)?;
                self.set_selected_folder(&args.path).await?;
                Ok(Value::Null)
            }
            HostCommand::GetFavorites => to_json(self.favorites().await?),
            HostCommand::AddFavorite => {
                let args: PathArgs = parse_args(command, args)?;
                self.add_favorite(&args.path).await?;
                Ok(Value::Null)
            }
            HostCommand::RemoveFavorite => {
                let args: PathArgs = parse_args(command, args)?;
                self.remove_favorite(&args.path).await?;
                Ok(Value::Null)
            }
            HostCommand::GetVisibleColumns => to_json(self.visible_columns().await?),
            HostCommand::SetVisibleColumns => {
                let args: ColumnsArgs = parse_args(command, args)?;
                self.set_visible_columns(&args.columns).await?;
                Ok(Value::Null)
            }
        }
    }
}

impl<S: SettingsStore, R: IdentityResolver> FolderBrowserService for HostContext<S, R> {
    fn list_dir_with_metadata<'a>(
        &'a self,
        path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<Vec<FileSystemEntryMetadata>, String>> {
        Box::pin(async move {
            self.resolver.list_dir(Path::new(path)).map_err(|err| {
                warn!(path, error = %err, "directory listing failed");
                err.to_string()
            })
        })
    }

    fn path_separator<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>> {
        Box::pin(async { Ok(std::path::MAIN_SEPARATOR.to_string()) })
    }

    fn selected_folder<'a>(&'a self) -> FolderBrowserFuture<'a, Result<String, String>> {
        Box::pin(async move { Ok(self.selected.get()) })
    }

    fn set_selected_folder<'a>(
        &'a self,
        path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.selected.set(path);
            Ok(())
        })
    }

    fn favorites<'a>(&'a self) -> FolderBrowserFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move { Ok(self.settings.favorites().await?.into_paths()) })
    }

    fn add_favorite<'a>(&'a self, path: &'a str) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if !self.settings.add_favorite(path).await? {
                debug!(path, "favorite already present");
            }
            Ok(())
        })
    }

    fn remove_favorite<'a>(
        &'a self,
        path: &'a str,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if !self.settings.remove_favorite(path).await? {
                debug!(path, "favorite not present");
            }
            Ok(())
        })
    }

    fn visible_columns<'a>(&'a self) -> FolderBrowserFuture<'a, Result<ColumnSelection, String>> {
        Box::pin(async move { self.settings.visible_columns().await })
    }

    fn set_visible_columns<'a>(
        &'a self,
        columns: &'a ColumnSelection,
    ) -> FolderBrowserFuture<'a, Result<(), String>> {
        Box::pin(async move { self.settings.set_visible_columns(columns).await })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemorySettingsStore, UnknownIdentityResolver};
    use serde_json::json;

    use super::*;

    fn context() -> HostContext<MemorySettingsStore, UnknownIdentityResolver> {
        block_on(HostContext::init(
            MemorySettingsStore::default(),
            "/home/alice",
            UnknownIdentityResolver,
        ))
        .expect("init context")
    }

    #[test]
    fn command_names_round_trip() {
        for command in HostCommand::ALL {
            assert_eq!(HostCommand::from_name(command.name()), Some(command));
        }
        assert_eq!(HostCommand::from_name("fs_delete"), None);
    }

    #[test]
    fn init_selects_initial_load_folder() {
        let ctx = context();
        assert_eq!(
            block_on(ctx.invoke("app_get_selected_folder", Value::Null)).expect("get"),
            json!("/home/alice")
        );
    }

    #[test]
    fn selected_folder_commands_update_shared_cell() {
        let ctx = context();
        let cell = ctx.selected_folder_cell();
        block_on(ctx.invoke("app_set_selected_folder", json!({"path": "/srv"}))).expect("set");
        assert_eq!(cell.get(), "/srv");
        assert_eq!(
            block_on(ctx.invoke("app_get_selected_folder", Value::Null)).expect("get"),
            json!("/srv")
        );
    }

    #[test]
    fn favorite_commands_reject_duplicates() {
        let ctx = context();
        block_on(ctx.invoke("app_add_favorite", json!({"path": "/srv"}))).expect("add");
        block_on(ctx.invoke("app_add_favorite", json!({"path": "/srv"}))).expect("add again");

        let favorites: Vec<String> = serde_json::from_value(
            block_on(ctx.invoke("app_get_favorites", Value::Null)).expect("get"),
        )
        .expect("favorites payload");
        assert_eq!(favorites.iter().filter(|path| *path == "/srv").count(), 1);
        assert_eq!(favorites.len(), 6);

        block_on(ctx.invoke("app_remove_favorite", json!({"path": "/srv"}))).expect("remove");
        let favorites = block_on(ctx.favorites()).expect("favorites");
        assert!(!favorites.contains(&"/srv".to_string()));
    }

    #[test]
    fn visible_column_commands_persist_selection() {
        let ctx = context();
        assert_eq!(
            block_on(ctx.invoke("app_get_visible_columns", Value::Null)).expect("get"),
            json!(["name", "size", "type", "dateModified"])
        );

        block_on(ctx.invoke(
            "app_set_visible_columns",
            json!({"columns": ["owner", "name"]}),
        ))
        .expect("set");
        assert_eq!(
            block_on(ctx.invoke("app_get_visible_columns", Value::Null)).expect("get"),
            json!(["owner", "name"])
        );
    }

    #[test]
    fn dispatcher_rejects_unknown_commands_and_bad_arguments() {
        let ctx = context();
        let err = block_on(ctx.invoke("fs_delete", Value::Null)).expect_err("unknown command");
        assert_eq!(err, "unknown host command `fs_delete`");

        let err = block_on(ctx.invoke("app_add_favorite", json!({"folder": "/srv"})))
            .expect_err("bad arguments");
        assert!(
            err.starts_with("invalid arguments for `app_add_favorite`:"),
            "unexpected error: {err}"
        );

        let err = block_on(ctx.invoke(
            "app_set_visible_columns",
            json!({"columns": ["colour"]}),
        ))
        .expect_err("unknown column");
        assert!(err.contains("app_set_visible_columns"), "unexpected error: {err}");
    }

    #[test]
    fn path_separator_matches_platform() {
        let ctx = context();
        assert_eq!(
            block_on(ctx.invoke("fs_path_separator", Value::Null)).expect("separator"),
            json!(std::path::MAIN_SEPARATOR.to_string())
        );
    }
}

//! Privileged host process for the file browser.
//!
//! This crate owns every capability the renderer is not allowed to touch directly: native
//! directory listings, owner/group lookups, and the settings file. The renderer reaches them
//! only through [`HostContext`], either as a [`platform_host::FolderBrowserService`] or through
//! the named-command dispatcher [`HostContext::invoke`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod commands;
pub mod explorer;
mod identity;
mod prefs;

use std::path::PathBuf;

use desktop_app_file_browser::{project_listing, render_listing_text};
use futures::executor::block_on;
use platform_host::FolderBrowserService;
use tracing::info;

pub use commands::{HostCommand, HostContext};
pub use explorer::{ListingError, NativeMetadataResolver};
pub use identity::SystemIdentityResolver;
pub use prefs::{FileSettingsStore, SETTINGS_FILE_NAME};

/// Environment variable overriding the settings directory.
pub const CONFIG_DIR_ENV: &str = "FILE_BROWSER_CONFIG_DIR";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "file-browser";

/// Resolves the settings directory: [`CONFIG_DIR_ENV`] when set, else the platform config dir.
///
/// # Errors
///
/// Returns an error when neither source yields a directory.
pub fn config_dir() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| "could not determine a config directory".to_string())
}

/// Home directory used for first-run defaults.
///
/// # Errors
///
/// Returns an error when the platform reports no home directory.
pub fn home_dir() -> Result<PathBuf, String> {
    dirs::home_dir().ok_or_else(|| "could not determine the home directory".to_string())
}

/// Native host context wired to the settings file and the system identity databases.
pub type NativeHostContext = HostContext<FileSettingsStore, SystemIdentityResolver>;

/// Builds the native host context from the resolved config and home directories.
///
/// # Errors
///
/// Returns an error when the settings directory cannot be created or read.
pub async fn bootstrap() -> Result<NativeHostContext, String> {
    let config = config_dir()?;
    let home = home_dir()?;
    let store = FileSettingsStore::from_root(&config)?;
    info!(settings = %store.file().display(), "loading settings");
    HostContext::init(store, home, SystemIdentityResolver).await
}

/// Runs one headless browse cycle and returns the rendered listing.
///
/// When `folder` is given it becomes the selected folder; otherwise the persisted initial
/// folder is listed.
///
/// # Errors
///
/// Returns an error when bootstrapping fails or the folder cannot be listed.
pub fn run(folder: Option<String>) -> Result<String, String> {
    block_on(async {
        let host = bootstrap().await?;
        if let Some(folder) = folder.as_deref() {
            host.set_selected_folder(folder).await?;
        }
        let selected = host.selected_folder().await?;
        let entries = host.list_dir_with_metadata(&selected).await?;
        let columns = host.visible_columns().await?;
        let view = project_listing(&entries, &columns);
        Ok(format!("{selected}\n{}", render_listing_text(&view)))
    })
}

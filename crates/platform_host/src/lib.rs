//! Typed host-domain contracts and shared browsing core for the file browser.
//!
//! This crate is the API-first boundary between the privileged host process and the renderer. It
//! exposes the folder-listing models, the navigation history and session state, the settings
//! store contract with typed accessors, and the identity-lookup capability. The native
//! implementations live in `desktop_host`; the projector and UI live in
//! `desktop_app_file_browser`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod history;
pub mod identity;
pub mod session;
pub mod storage;
pub mod time;

pub use fs::path::{folder_display_name, has_separator};
pub use fs::service::{FolderBrowserFuture, FolderBrowserService, NoopFolderBrowserService};
pub use fs::types::{
    ColumnKey, ColumnSelection, EntryType, FilePermissions, FileSystemEntryMetadata,
    UNKNOWN_LABEL,
};
pub use history::{HistoryError, NavigationHistory};
pub use identity::{
    resolve_identity_or_unknown, EntryIdentity, IdentityResolver, UnknownIdentityResolver,
};
pub use session::{BrowserSession, RequestToken, SelectedFolderCell};
pub use storage::prefs::{
    load_setting_with, save_setting_with, MemorySettingsStore, NoopSettingsStore, SettingsStore,
    SettingsStoreFuture,
};
pub use storage::settings::{
    default_favorites, BrowserSettings, FavoritesList, DEFAULT_FAVORITE_FOLDERS, FAVORITES_KEY,
    INITIAL_LOAD_FOLDER_KEY, VISIBLE_COLUMNS_KEY,
};
pub use time::system_time_to_unix_ms;

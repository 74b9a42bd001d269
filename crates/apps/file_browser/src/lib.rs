//! Folder browser renderer: listing projection, text rendering and the Leptos UI.
//!
//! The UI never touches the filesystem. Every read and every settings change goes through the
//! [`FolderBrowserService`] handed to [`FileBrowserApp`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod projection;
mod render;

use std::rc::Rc;

use leptos::logging;
use leptos::*;
use platform_host::{
    BrowserSession, ColumnKey, ColumnSelection, FileSystemEntryMetadata,
    FolderBrowserService, RequestToken,
};

pub use projection::{
    column_def, favorite_label, format_date, format_date_in, format_permissions, format_size,
    project_listing, ColumnDef, FavoriteLabel, HeaderCell, ListingRow, ListingView, RowCell,
    COLUMN_DEFS, INVALID_DATE, MAX_DATE_MS, NO_SIZE,
};
pub use render::render_listing_text;

#[derive(Clone, Copy)]
struct BrowserState {
    host: StoredValue<Rc<dyn FolderBrowserService>>,
    session: RwSignal<BrowserSession>,
    entries: RwSignal<Vec<FileSystemEntryMetadata>>,
    error: RwSignal<Option<String>>,
    favorites: RwSignal<Vec<String>>,
    columns: RwSignal<ColumnSelection>,
}

impl BrowserState {
    fn current_folder(self) -> Option<String> {
        self.session
            .with(|session| session.history().current().map(str::to_string))
    }

    fn open(self, path: String) {
        if let Some(token) = self.session.try_update(|session| session.open(path.clone())) {
            self.load(path, token);
        }
    }

    fn back(self) {
        match self.session.try_update(BrowserSession::go_back) {
            Some(Ok((path, token))) => self.load(path, token),
            Some(Err(err)) => logging::warn!("file browser navigation failed: {err}"),
            None => {}
        }
    }

    fn forward(self) {
        match self.session.try_update(BrowserSession::go_forward) {
            Some(Ok((path, token))) => self.load(path, token),
            Some(Err(err)) => logging::warn!("file browser navigation failed: {err}"),
            None => {}
        }
    }

    fn reload(self) {
        if let Some(Some((path, token))) = self.session.try_update(BrowserSession::reload) {
            self.load(path, token);
        }
    }

    fn load(self, path: String, token: RequestToken) {
        let host = self.host.get_value();
        spawn_local(async move {
            if let Err(err) = host.set_selected_folder(&path).await {
                logging::warn!("file browser selection update failed: {err}");
            }
            let result = host.list_dir_with_metadata(&path).await;
            if !self.session.with_untracked(|session| session.is_current(token)) {
                return;
            }
            match result {
                Ok(listing) => {
                    self.error.set(None);
                    self.entries.set(listing);
                }
                Err(err) => {
                    logging::warn!("file browser listing failed for {path}: {err}");
                    self.entries.set(Vec::new());
                    self.error.set(Some(err));
                }
            }
        });
    }

    fn refresh_favorites(self) {
        let host = self.host.get_value();
        spawn_local(async move {
            match host.favorites().await {
                Ok(paths) => self.favorites.set(paths),
                Err(err) => logging::warn!("file browser favorites load failed: {err}"),
            }
        });
    }

    fn toggle_favorite(self, path: String) {
        let host = self.host.get_value();
        let is_favorite = self.favorites.with_untracked(|paths| paths.contains(&path));
        spawn_local(async move {
            let result = if is_favorite {
                host.remove_favorite(&path).await
            } else {
                host.add_favorite(&path).await
            };
            if let Err(err) = result {
                logging::warn!("file browser favorite update failed: {err}");
            }
            self.refresh_favorites();
        });
    }

    fn toggle_column(self, key: ColumnKey) {
        let next = self.columns.get_untracked().toggled(key);
        self.columns.set(next.clone());
        let host = self.host.get_value();
        spawn_local(async move {
            if let Err(err) = host.set_visible_columns(&next).await {
                logging::warn!("file browser column persist failed after toggling {key}: {err}");
            }
        });
    }
}

#[component]
/// Folder browser with back/forward navigation, favorites, a column chooser and the listing.
pub fn FileBrowserApp(
    /// Privileged host operations.
    host: Rc<dyn FolderBrowserService>,
) -> impl IntoView {
    let state = BrowserState {
        host: store_value(host),
        session: create_rw_signal(BrowserSession::new()),
        entries: create_rw_signal(Vec::new()),
        error: create_rw_signal(None),
        favorites: create_rw_signal(Vec::new()),
        columns: create_rw_signal(ColumnSelection::default()),
    };
    let separator = create_rw_signal(std::path::MAIN_SEPARATOR.to_string());
    let show_columns = create_rw_signal(false);

    let host = state.host.get_value();
    spawn_local(async move {
        match host.path_separator().await {
            Ok(value) => separator.set(value),
            Err(err) => logging::warn!("file browser separator load failed: {err}"),
        }
        match host.visible_columns().await {
            Ok(columns) => state.columns.set(columns),
            Err(err) => logging::warn!("file browser columns load failed: {err}"),
        }
        state.refresh_favorites();
        match host.selected_folder().await {
            Ok(folder) => state.open(folder),
            Err(err) => {
                logging::warn!("file browser initial folder load failed: {err}");
                state.error.set(Some(err));
            }
        }
    });

    let listing = create_memo(move |_| {
        state
            .entries
            .with(|entries| state.columns.with(|columns| project_listing(entries, columns)))
    });

    view! {
        <div class="app-shell app-file-browser-shell">
            <div class="app-toolbar">
                <button
                    type="button"
                    disabled=move || !state.session.with(|s| s.history().can_go_back())
                    on:click=move |_| state.back()
                >
                    "Back"
                </button>
                <button
                    type="button"
                    disabled=move || !state.session.with(|s| s.history().can_go_forward())
                    on:click=move |_| state.forward()
                >
                    "Forward"
                </button>
                <button
                    type="button"
                    disabled=move || state.current_folder().is_none()
                    on:click=move |_| state.reload()
                >
                    "Refresh"
                </button>
                <span class="pane-path">
                    {move || state.current_folder().unwrap_or_default()}
                </span>
                <button
                    type="button"
                    disabled=move || state.current_folder().is_none()
                    on:click=move |_| {
                        if let Some(folder) = state.current_folder() {
                            state.toggle_favorite(folder);
                        }
                    }
                >
                    {move || {
                        let pinned = state
                            .current_folder()
                            .map(|folder| state.favorites.with(|paths| paths.contains(&folder)))
                            .unwrap_or(false);
                        if pinned { "Unpin" } else { "Pin" }
                    }}
                </button>
                <button type="button" on:click=move |_| show_columns.update(|v| *v = !*v)>
                    "Columns"
                </button>
            </div>

            <nav class="favorites-bar" aria-label="Favorites">
                <For
                    each=move || state.favorites.get()
                    key=|path| path.clone()
                    children=move |path| view! {
                        <FavoriteButton path=path separator=separator state=state />
                    }
                />
            </nav>

            <Show when=move || show_columns.get() fallback=|| ()>
                <ColumnChooser state=state />
            </Show>

            {move || {
                state
                    .error
                    .get()
                    .map(|err| view! { <div class="file-display-error" role="alert">{err}</div> })
            }}

            <div class="file-display-wrap">
                <table class="file-display" role="grid" aria-label="Folder contents">
                    <thead>
                        <tr>
                            {move || {
                                listing.with(|listing_view| {
                                    listing_view.header
                                        .iter()
                                        .map(|cell| view! { <th class=cell.class>{cell.caption}</th> })
                                        .collect_view()
                                })
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            listing.with(|listing_view| {
                                listing_view.rows
                                    .iter()
                                    .cloned()
                                    .map(|row| view! { <FileRow row=row state=state /> })
                                    .collect_view()
                            })
                        }}
                    </tbody>
                </table>
                <Show
                    when=move || listing.with(ListingView::is_empty) && state.error.with(Option::is_none)
                    fallback=|| ()
                >
                    <div class="file-display-empty">"This folder is empty."</div>
                </Show>
            </div>

            <div class="app-statusbar">
                <span>{move || format!("{} item(s)", state.entries.with(Vec::len))}</span>
            </div>
        </div>
    }
}

#[component]
fn FavoriteButton(path: String, separator: RwSignal<String>, state: BrowserState) -> impl IntoView {
    let label = {
        let path = path.clone();
        create_memo(move |_| separator.with(|sep| favorite_label(&path, sep)))
    };
    let title = path.clone();
    view! {
        <button type="button" class="favorite" title=title on:click=move |_| state.open(path.clone())>
            <Show when=move || label.with(|label| label.folder_glyph) fallback=|| ()>
                <span class="favorite-glyph folder-glyph" aria-hidden="true"></span>
            </Show>
            <span class="favorite-name">{move || label.with(|label| label.text.clone())}</span>
        </button>
    }
}

#[component]
fn ColumnChooser(state: BrowserState) -> impl IntoView {
    view! {
        <fieldset class="column-chooser">
            <legend>"Visible columns"</legend>
            {ColumnKey::ALL
                .into_iter()
                .map(|key| {
                    view! {
                        <label>
                            <input
                                type="checkbox"
                                value=key.as_str()
                                prop:checked=move || state.columns.with(|columns| columns.contains(key))
                                on:change=move |_| state.toggle_column(key)
                            />
                            {column_def(key).caption}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

#[component]
fn FileRow(row: ListingRow, state: BrowserState) -> impl IntoView {
    let location = row.location.clone();
    let navigable = row.navigable;
    view! {
        <tr
            class={if navigable { "file-row navigable" } else { "file-row" }}
            on:dblclick=move |_| {
                if navigable {
                    state.open(location.clone());
                }
            }
        >
            {row
                .cells
                .into_iter()
                .map(|cell| view! { <td class=cell.class>{cell.text}</td> })
                .collect_view()}
        </tr>
    }
}

//! Column-filtered view model built from raw directory metadata.

use chrono::{DateTime, Datelike, Local, TimeZone};
use platform_host::{
    has_separator, folder_display_name, ColumnKey, ColumnSelection, EntryType, FilePermissions,
    FileSystemEntryMetadata,
};

const KB: u64 = 1_000;
const MB_THRESHOLD: u64 = 10_000_000;
const GB_THRESHOLD: u64 = 10_000_000_000;
const TB_THRESHOLD: u64 = 10_000_000_000_000;

/// Placeholder shown in the size column for entries without a byte size.
pub const NO_SIZE: &str = "-";

/// Text shown for timestamps outside the representable range.
pub const INVALID_DATE: &str = "Invalid Date";

/// Largest timestamp magnitude, in unix milliseconds, that still renders as a date.
pub const MAX_DATE_MS: i64 = 8_640_000_000_000_000;

const DAY_FORMAT: &str = "%a %b %d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Caption and style class of one display column.
pub struct ColumnDef {
    /// Column key.
    pub key: ColumnKey,
    /// Header caption.
    pub caption: &'static str,
    /// Style class shared by the header cell and every row cell.
    pub class: &'static str,
}

/// Every column, indexed by [`ColumnKey`] declaration order.
pub static COLUMN_DEFS: [ColumnDef; 10] = [
    ColumnDef {
        key: ColumnKey::Name,
        caption: "Name",
        class: "file-display-name",
    },
    ColumnDef {
        key: ColumnKey::Size,
        caption: "Size",
        class: "file-display-size",
    },
    ColumnDef {
        key: ColumnKey::Type,
        caption: "Type",
        class: "file-display-type",
    },
    ColumnDef {
        key: ColumnKey::Owner,
        caption: "Owner",
        class: "file-display-owner",
    },
    ColumnDef {
        key: ColumnKey::Group,
        caption: "Group",
        class: "file-display-group",
    },
    ColumnDef {
        key: ColumnKey::Permissions,
        caption: "Permissions",
        class: "file-display-permissions",
    },
    ColumnDef {
        key: ColumnKey::Location,
        caption: "Location",
        class: "file-display-location",
    },
    ColumnDef {
        key: ColumnKey::DateModified,
        caption: "Date Modified",
        class: "file-display-modified",
    },
    ColumnDef {
        key: ColumnKey::DateAccessed,
        caption: "Date Accessed",
        class: "file-display-accessed",
    },
    ColumnDef {
        key: ColumnKey::DateCreated,
        caption: "Date Created",
        class: "file-display-created",
    },
];

/// Looks up the caption and class for `key`.
pub fn column_def(key: ColumnKey) -> &'static ColumnDef {
    &COLUMN_DEFS[key as usize]
}

/// Formats a byte count for the size column.
///
/// Thresholds are decimal. Units above kilobytes divide by ten times the nominal unit, and the
/// terabyte value keeps its fractional part.
pub fn format_size(size: u64, entry_type: &EntryType) -> String {
    if !entry_type.has_byte_size() {
        return NO_SIZE.to_string();
    }
    match size {
        1 => "1 byte".to_string(),
        n if n < KB => format!("{n} bytes"),
        n if n < MB_THRESHOLD => format!("{} KB", n / KB),
        n if n < GB_THRESHOLD => format!("{} MB", n / MB_THRESHOLD),
        n if n < TB_THRESHOLD => format!("{} GB", n / GB_THRESHOLD),
        n => format!("{} TB", n as f64 / TB_THRESHOLD as f64),
    }
}

/// `R`, `W` and `X` for each granted right, in that order.
pub fn format_permissions(permissions: &FilePermissions) -> String {
    let mut letters = String::with_capacity(3);
    if permissions.read {
        letters.push('R');
    }
    if permissions.write {
        letters.push('W');
    }
    if permissions.execute {
        letters.push('X');
    }
    letters
}

/// Formats unix milliseconds as a calendar date in the local time zone.
pub fn format_date(unix_ms: i64) -> String {
    format_date_in(unix_ms, &Local)
}

/// Formats unix milliseconds as a calendar date (`Thu Jan 01 1970`) in `tz`.
///
/// Timestamps beyond [`MAX_DATE_MS`] either side of the epoch render [`INVALID_DATE`]. Years are
/// zero-padded to four digits and never carry a `+` sign; years before 1 BCE get a leading `-`.
pub fn format_date_in<Tz: TimeZone>(unix_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if !(-MAX_DATE_MS..=MAX_DATE_MS).contains(&unix_ms) {
        return INVALID_DATE.to_string();
    }
    let Some(utc) = DateTime::from_timestamp_millis(unix_ms) else {
        return INVALID_DATE.to_string();
    };
    let local = utc.with_timezone(tz);
    let year = local.year();
    let sign = if year < 0 { "-" } else { "" };
    format!(
        "{} {sign}{:04}",
        local.format(DAY_FORMAT),
        year.unsigned_abs()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Label of one favorites-bar entry.
pub struct FavoriteLabel {
    /// Folder name shown on the button.
    pub text: String,
    /// `true` when the path has a separator and the button shows a folder glyph before the name.
    pub folder_glyph: bool,
}

/// Builds the favorites-bar label for `path`.
///
/// Paths with a separator show a folder glyph and their last component; anything else is shown
/// verbatim.
pub fn favorite_label(path: &str, separator: &str) -> FavoriteLabel {
    if has_separator(path, separator) {
        FavoriteLabel {
            text: folder_display_name(path, separator),
            folder_glyph: true,
        }
    } else {
        FavoriteLabel {
            text: path.to_string(),
            folder_glyph: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Header caption for one visible column.
pub struct HeaderCell {
    /// Column key.
    pub key: ColumnKey,
    /// Caption text.
    pub caption: &'static str,
    /// Style class.
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One formatted field of a row.
pub struct RowCell {
    /// Column key.
    pub key: ColumnKey,
    /// Style class.
    pub class: &'static str,
    /// Display text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry projected onto the visible columns.
pub struct ListingRow {
    /// Absolute path of the entry, usable as a stable row key.
    pub location: String,
    /// `true` for folders (including links to folders), which the UI opens on activation.
    pub navigable: bool,
    /// Cells in header order.
    pub cells: Vec<RowCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Header and rows for a directory listing under a column selection.
pub struct ListingView {
    /// Visible columns in canonical order.
    pub columns: Vec<ColumnKey>,
    /// One header cell per visible column.
    pub header: Vec<HeaderCell>,
    /// One row per entry, in listing order.
    pub rows: Vec<ListingRow>,
}

impl ListingView {
    /// Returns `true` when the listed folder has no entries.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(entry: &FileSystemEntryMetadata, key: ColumnKey) -> String {
    match key {
        ColumnKey::Name => entry.name.clone(),
        ColumnKey::Size => format_size(entry.size, &entry.entry_type),
        ColumnKey::Type => entry.entry_type.label(),
        ColumnKey::Owner => entry.owner.clone(),
        ColumnKey::Group => entry.group.clone(),
        ColumnKey::Permissions => format_permissions(&entry.permissions),
        ColumnKey::Location => entry.location.clone(),
        ColumnKey::DateModified => format_date(entry.modified_at_unix_ms),
        ColumnKey::DateAccessed => format_date(entry.accessed_at_unix_ms),
        ColumnKey::DateCreated => format_date(entry.created_at_unix_ms),
    }
}

/// Projects `entries` onto the visible `columns`.
///
/// Columns always appear in canonical order regardless of the order they were selected in.
pub fn project_listing(
    entries: &[FileSystemEntryMetadata],
    columns: &ColumnSelection,
) -> ListingView {
    let keys = columns.canonical();
    let header = keys
        .iter()
        .map(|key| {
            let def = column_def(*key);
            HeaderCell {
                key: def.key,
                caption: def.caption,
                class: def.class,
            }
        })
        .collect();
    let rows = entries
        .iter()
        .map(|entry| ListingRow {
            location: entry.location.clone(),
            navigable: entry.navigable,
            cells: keys
                .iter()
                .map(|key| RowCell {
                    key: *key,
                    class: column_def(*key).class,
                    text: cell_text(entry, *key),
                })
                .collect(),
        })
        .collect();

    ListingView {
        columns: keys,
        header,
        rows,
    }
}

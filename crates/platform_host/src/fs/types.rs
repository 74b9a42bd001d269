//! Folder listing data types shared by the privileged host and the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display label used when an owner, group or entry kind cannot be determined.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Kind of a directory entry as reported by the filesystem.
pub enum EntryType {
    /// Regular file, labelled by its extension when it has one.
    File {
        /// Extension without the leading dot, as found on disk.
        extension: Option<String>,
    },
    /// Directory.
    Directory,
    /// Symbolic link (not followed).
    SymbolicLink,
    /// Block device node.
    BlockDevice,
    /// Character device node.
    CharacterDevice,
    /// Named pipe.
    Fifo,
    /// Unix domain socket.
    Socket,
    /// Anything the platform reports that matches none of the above.
    Unknown,
}

impl EntryType {
    /// Builds a regular-file type from a file name's extension.
    pub fn file_with_extension(extension: Option<&str>) -> Self {
        let extension = extension
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(str::to_string);
        Self::File { extension }
    }

    /// Human-readable type label shown in the type column.
    pub fn label(&self) -> String {
        match self {
            Self::File {
                extension: Some(ext),
            } => format!("{} File", ext.to_uppercase()),
            Self::File { extension: None } => "File".to_string(),
            Self::Directory => "Directory".to_string(),
            Self::SymbolicLink => "Symbolic Link".to_string(),
            Self::BlockDevice => "Block Device".to_string(),
            Self::CharacterDevice => "Character Device".to_string(),
            Self::Fifo => "FIFO special file".to_string(),
            Self::Socket => "Socket".to_string(),
            Self::Unknown => UNKNOWN_LABEL.to_string(),
        }
    }

    /// Returns `true` when the size column shows a byte count for this kind.
    ///
    /// Directories, links, devices, pipes and sockets show a placeholder instead.
    pub fn has_byte_size(&self) -> bool {
        matches!(self, Self::File { .. } | Self::Unknown)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Access rights of the current process on one entry.
pub struct FilePermissions {
    /// Entry is readable.
    pub read: bool,
    /// Entry is writable.
    pub write: bool,
    /// Entry is executable (or searchable, for directories).
    pub execute: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Metadata for a single child of a listed directory.
pub struct FileSystemEntryMetadata {
    /// Base name of the entry.
    pub name: String,
    /// Size in bytes as reported by stat.
    pub size: u64,
    /// Entry kind.
    pub entry_type: EntryType,
    /// Owning user name.
    pub owner: String,
    /// Owning group name.
    pub group: String,
    /// Access rights of the current process.
    pub permissions: FilePermissions,
    /// Absolute path of the entry.
    pub location: String,
    /// `true` when the entry can be opened as a folder, following symbolic links.
    #[serde(default)]
    pub navigable: bool,
    /// Last modification time in unix milliseconds.
    pub modified_at_unix_ms: i64,
    /// Last access time in unix milliseconds.
    pub accessed_at_unix_ms: i64,
    /// Creation time in unix milliseconds.
    pub created_at_unix_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One of the recognised display columns, declared in canonical display order.
pub enum ColumnKey {
    /// Entry name.
    Name,
    /// Formatted size.
    Size,
    /// Type label.
    Type,
    /// Owning user.
    Owner,
    /// Owning group.
    Group,
    /// `RWX` permission letters.
    Permissions,
    /// Absolute path.
    Location,
    /// Modification date.
    #[serde(alias = "modified")]
    DateModified,
    /// Access date.
    #[serde(alias = "accessed")]
    DateAccessed,
    /// Creation date.
    #[serde(alias = "created")]
    DateCreated,
}

impl ColumnKey {
    /// Every column in canonical display order.
    pub const ALL: [ColumnKey; 10] = [
        Self::Name,
        Self::Size,
        Self::Type,
        Self::Owner,
        Self::Group,
        Self::Permissions,
        Self::Location,
        Self::DateModified,
        Self::DateAccessed,
        Self::DateCreated,
    ];

    /// Stable key string used in persisted settings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Type => "type",
            Self::Owner => "owner",
            Self::Group => "group",
            Self::Permissions => "permissions",
            Self::Location => "location",
            Self::DateModified => "dateModified",
            Self::DateAccessed => "dateAccessed",
            Self::DateCreated => "dateCreated",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnKey>", into = "Vec<ColumnKey>")]
/// User-chosen set of visible columns, kept in the order the user picked them.
///
/// Duplicate keys are dropped on construction. Display order is always canonical; see
/// [`ColumnSelection::canonical`].
pub struct ColumnSelection(Vec<ColumnKey>);

impl ColumnSelection {
    /// Builds a selection, dropping repeated keys.
    pub fn new(keys: impl IntoIterator<Item = ColumnKey>) -> Self {
        let mut unique = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self(unique)
    }

    /// Returns `true` when `key` is selected.
    pub fn contains(&self, key: ColumnKey) -> bool {
        self.0.contains(&key)
    }

    /// Selected keys in the order they were chosen.
    pub fn keys(&self) -> &[ColumnKey] {
        &self.0
    }

    /// Selected keys in canonical display order.
    pub fn canonical(&self) -> Vec<ColumnKey> {
        ColumnKey::ALL
            .into_iter()
            .filter(|key| self.contains(*key))
            .collect()
    }

    /// Returns a copy with `key` added or removed.
    pub fn toggled(&self, key: ColumnKey) -> Self {
        if self.contains(key) {
            Self(self.0.iter().copied().filter(|k| *k != key).collect())
        } else {
            let mut keys = self.0.clone();
            keys.push(key);
            Self(keys)
        }
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self(vec![
            ColumnKey::Name,
            ColumnKey::Size,
            ColumnKey::Type,
            ColumnKey::DateModified,
        ])
    }
}

impl From<Vec<ColumnKey>> for ColumnSelection {
    fn from(keys: Vec<ColumnKey>) -> Self {
        Self::new(keys)
    }
}

impl From<ColumnSelection> for Vec<ColumnKey> {
    fn from(selection: ColumnSelection) -> Self {
        selection.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entry_type_labels_match_display_strings() {
        let cases = [
            (EntryType::file_with_extension(Some("txt")), "TXT File"),
            (EntryType::file_with_extension(Some("tar")), "TAR File"),
            (EntryType::file_with_extension(Some("  ")), "File"),
            (EntryType::file_with_extension(None), "File"),
            (EntryType::Directory, "Directory"),
            (EntryType::SymbolicLink, "Symbolic Link"),
            (EntryType::BlockDevice, "Block Device"),
            (EntryType::CharacterDevice, "Character Device"),
            (EntryType::Fifo, "FIFO special file"),
            (EntryType::Socket, "Socket"),
            (EntryType::Unknown, "Unknown"),
        ];

        for (entry_type, expected) in cases {
            assert_eq!(entry_type.label(), expected, "entry_type={entry_type:?}");
        }
    }

    #[test]
    fn only_files_and_unknown_entries_have_byte_sizes() {
        assert!(EntryType::file_with_extension(None).has_byte_size());
        assert!(EntryType::Unknown.has_byte_size());
        for entry_type in [
            EntryType::Directory,
            EntryType::SymbolicLink,
            EntryType::BlockDevice,
            EntryType::CharacterDevice,
            EntryType::Fifo,
            EntryType::Socket,
        ] {
            assert!(!entry_type.has_byte_size(), "entry_type={entry_type:?}");
        }
    }

    #[test]
    fn column_keys_serialize_as_camel_case_and_accept_legacy_aliases() {
        assert_eq!(
            serde_json::to_value(ColumnKey::DateModified).expect("serialize"),
            json!("dateModified")
        );
        let keys: Vec<ColumnKey> =
            serde_json::from_value(json!(["name", "modified", "accessed", "created"]))
                .expect("deserialize");
        assert_eq!(
            keys,
            vec![
                ColumnKey::Name,
                ColumnKey::DateModified,
                ColumnKey::DateAccessed,
                ColumnKey::DateCreated
            ]
        );
        assert!(serde_json::from_value::<ColumnKey>(json!("colour")).is_err());
    }

    #[test]
    fn selection_reports_canonical_order_and_drops_duplicates() {
        let selection = ColumnSelection::new([
            ColumnKey::Owner,
            ColumnKey::Name,
            ColumnKey::Owner,
            ColumnKey::DateCreated,
            ColumnKey::Size,
        ]);
        assert_eq!(
            selection.keys(),
            [
                ColumnKey::Owner,
                ColumnKey::Name,
                ColumnKey::DateCreated,
                ColumnKey::Size
            ]
        );
        assert_eq!(
            selection.canonical(),
            vec![
                ColumnKey::Name,
                ColumnKey::Size,
                ColumnKey::Owner,
                ColumnKey::DateCreated
            ]
        );
    }

    #[test]
    fn selection_serde_dedupes_and_toggle_round_trips() {
        let selection: ColumnSelection =
            serde_json::from_value(json!(["size", "size", "name"])).expect("deserialize");
        assert_eq!(selection.keys(), [ColumnKey::Size, ColumnKey::Name]);

        let with_group = selection.toggled(ColumnKey::Group);
        assert!(with_group.contains(ColumnKey::Group));
        assert_eq!(with_group.toggled(ColumnKey::Group), selection);
        assert_eq!(
            serde_json::to_value(&with_group).expect("serialize"),
            json!(["size", "name", "group"])
        );
    }

    #[test]
    fn default_selection_matches_first_run_columns() {
        assert_eq!(
            ColumnSelection::default().canonical(),
            vec![
                ColumnKey::Name,
                ColumnKey::Size,
                ColumnKey::Type,
                ColumnKey::DateModified
            ]
        );
    }

    #[test]
    fn entry_metadata_round_trips_with_tagged_type() {
        let entry = FileSystemEntryMetadata {
            name: "notes.md".to_string(),
            size: 42,
            entry_type: EntryType::file_with_extension(Some("md")),
            owner: "alice".to_string(),
            group: "staff".to_string(),
            permissions: FilePermissions {
                read: true,
                write: true,
                execute: false,
            },
            location: "/home/alice/notes.md".to_string(),
            navigable: false,
            modified_at_unix_ms: 1_700_000_000_000,
            accessed_at_unix_ms: 1_700_000_000_500,
            created_at_unix_ms: 1_600_000_000_000,
        };

        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["entry_type"], json!({"kind": "file", "extension": "md"}));
        let round_trip: FileSystemEntryMetadata =
            serde_json::from_value(value).expect("deserialize");
        assert_eq!(round_trip, entry);
    }

    #[test]
    fn entry_metadata_without_navigable_flag_defaults_to_false() {
        let entry: FileSystemEntryMetadata = serde_json::from_value(json!({
            "name": "docs",
            "size": 4096,
            "entry_type": {"kind": "directory"},
            "owner": "alice",
            "group": "staff",
            "permissions": {"read": true, "write": true, "execute": true},
            "location": "/home/alice/docs",
            "modified_at_unix_ms": 0,
            "accessed_at_unix_ms": 0,
            "created_at_unix_ms": 0
        }))
        .expect("deserialize");
        assert!(!entry.navigable);
    }
}

//! Native folder listing with per-entry metadata resolution.

use std::fs::{self, FileType, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

use platform_host::{
    resolve_identity_or_unknown, system_time_to_unix_ms, EntryType, FilePermissions,
    FileSystemEntryMetadata, IdentityResolver,
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
/// Hard failures of a directory listing. No partial listing is ever returned.
pub enum ListingError {
    /// The directory itself could not be inspected.
    #[error("failed to read {}: {source}", path.display())]
    Stat {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The requested path exists but is not a directory.
    #[error("path `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// The directory could not be enumerated.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A child entry vanished or could not be stat'ed mid-listing.
    #[error("failed to read metadata {}: {source}", path.display())]
    Entry {
        /// Child entry path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Maps an `lstat` file type to an [`EntryType`], labelling regular files by extension.
fn entry_type(file_type: &FileType, path: &Path) -> EntryType {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;

        if file_type.is_block_device() {
            return EntryType::BlockDevice;
        }
        if file_type.is_char_device() {
            return EntryType::CharacterDevice;
        }
        if file_type.is_dir() {
            return EntryType::Directory;
        }
        if file_type.is_fifo() {
            return EntryType::Fifo;
        }
        if file_type.is_file() {
            return regular_file_type(path);
        }
        if file_type.is_socket() {
            return EntryType::Socket;
        }
    }

    #[cfg(not(unix))]
    {
        if file_type.is_dir() {
            return EntryType::Directory;
        }
        if file_type.is_file() {
            return regular_file_type(path);
        }
    }

    if file_type.is_symlink() {
        EntryType::SymbolicLink
    } else {
        EntryType::Unknown
    }
}

fn regular_file_type(path: &Path) -> EntryType {
    EntryType::file_with_extension(path.extension().and_then(|ext| ext.to_str()))
}

/// Runs the three access checks independently; a failing check reads as `false`.
#[cfg(unix)]
fn permissions_for(path: &Path, _metadata: &Metadata) -> FilePermissions {
    use nix::unistd::{access, AccessFlags};

    FilePermissions {
        read: access(path, AccessFlags::R_OK).is_ok(),
        write: access(path, AccessFlags::W_OK).is_ok(),
        execute: access(path, AccessFlags::X_OK).is_ok(),
    }
}

#[cfg(not(unix))]
fn permissions_for(path: &Path, metadata: &Metadata) -> FilePermissions {
    FilePermissions {
        read: fs::metadata(path).is_ok(),
        write: !metadata.permissions().readonly(),
        execute: false,
    }
}

fn created_at_unix_ms(metadata: &Metadata) -> i64 {
    if let Ok(created) = metadata.created() {
        return system_time_to_unix_ms(created);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        metadata
            .ctime()
            .saturating_mul(1000)
            .saturating_add(metadata.ctime_nsec() / 1_000_000)
    }

    #[cfg(not(unix))]
    {
        0
    }
}

/// Resolves `.` and `..` without touching the filesystem. `..` never climbs above the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Directories, and links whose target is a directory, can be opened.
fn is_navigable(path: &Path, metadata: &Metadata) -> bool {
    if metadata.is_dir() {
        return true;
    }
    metadata.file_type().is_symlink()
        && fs::metadata(path).map(|target| target.is_dir()).unwrap_or(false)
}

fn timestamp_or_zero(value: io::Result<std::time::SystemTime>) -> i64 {
    value.map(system_time_to_unix_ms).unwrap_or(0)
}

#[derive(Debug, Clone, Default)]
/// Reads directories from the native filesystem and resolves metadata for each child.
///
/// Entries are inspected with `lstat`, so symbolic links are reported as links (with the link's
/// own size) and dangling links never break a listing.
pub struct NativeMetadataResolver<R> {
    identity: R,
}

impl<R: IdentityResolver> NativeMetadataResolver<R> {
    /// Creates a resolver that uses `identity` for owner/group lookups.
    pub fn new(identity: R) -> Self {
        Self { identity }
    }

    /// Lists the immediate children of `dir` in enumeration order.
    ///
    /// `dir` is made absolute and `.`/`..` components are resolved lexically, so every
    /// `location` is a clean absolute path.
    ///
    /// # Errors
    ///
    /// Fails as a whole when `dir` is missing, is not a directory, cannot be enumerated, or a
    /// child cannot be stat'ed.
    pub fn list_dir(&self, dir: &Path) -> Result<Vec<FileSystemEntryMetadata>, ListingError> {
        let absolute_dir = std::path::absolute(dir)
            .map(|path| normalize_lexically(&path))
            .map_err(|source| ListingError::Stat {
                path: dir.to_path_buf(),
                source,
            })?;
        let meta = fs::metadata(&absolute_dir).map_err(|source| ListingError::Stat {
            path: absolute_dir.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ListingError::NotADirectory(absolute_dir));
        }

        let read_dir = fs::read_dir(&absolute_dir).map_err(|source| ListingError::ReadDir {
            path: absolute_dir.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|source| ListingError::ReadDir {
                path: absolute_dir.clone(),
                source,
            })?;
            entries.push(self.entry_metadata(&item.path())?);
        }

        debug!(
            dir = %absolute_dir.display(),
            entries = entries.len(),
            "listed directory"
        );
        Ok(entries)
    }

    /// Resolves metadata for a single entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Entry`] when `path` cannot be stat'ed.
    pub fn entry_metadata(&self, path: &Path) -> Result<FileSystemEntryMetadata, ListingError> {
        let metadata = fs::symlink_metadata(path).map_err(|source| ListingError::Entry {
            path: path.to_path_buf(),
            source,
        })?;

        let identity =
            resolve_identity_or_unknown(&self.identity, path, &metadata, |field, err| {
                warn!(path = %path.display(), field, error = %err, "identity lookup failed");
            });

        let name = path
            .file_name()
            .map(|value| value.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(FileSystemEntryMetadata {
            name,
            size: metadata.len(),
            entry_type: entry_type(&metadata.file_type(), path),
            owner: identity.owner,
            group: identity.group,
            permissions: permissions_for(path, &metadata),
            location: path.to_string_lossy().into_owned(),
            navigable: is_navigable(path, &metadata),
            modified_at_unix_ms: timestamp_or_zero(metadata.modified()),
            accessed_at_unix_ms: timestamp_or_zero(metadata.accessed()),
            created_at_unix_ms: created_at_unix_ms(&metadata),
        })
    }
}

//! Owner/group identity lookup capability.

use std::fs::Metadata;
use std::path::Path;

use crate::fs::types::UNKNOWN_LABEL;

/// Resolves the owning user and group names of a filesystem entry.
///
/// Implementations may shell out or query OS databases and are allowed to fail; callers treat a
/// failure as soft and substitute [`UNKNOWN_LABEL`] via [`resolve_identity_or_unknown`].
pub trait IdentityResolver {
    /// Returns the owning user name for `path`.
    fn owner_of(&self, path: &Path, metadata: &Metadata) -> Result<String, String>;

    /// Returns the owning group name for `path`.
    fn group_of(&self, path: &Path, metadata: &Metadata) -> Result<String, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Identity resolver for platforms without an owner/group concept.
pub struct UnknownIdentityResolver;

impl IdentityResolver for UnknownIdentityResolver {
    fn owner_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
        Ok(UNKNOWN_LABEL.to_string())
    }

    fn group_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
        Ok(UNKNOWN_LABEL.to_string())
    }
}

/// Resolved owner and group names for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIdentity {
    /// Owning user name.
    pub owner: String,
    /// Owning group name.
    pub group: String,
}

/// Resolves owner and group, replacing each failed lookup with [`UNKNOWN_LABEL`].
///
/// Failures are handed to `on_error` so the caller can log them.
pub fn resolve_identity_or_unknown<R: IdentityResolver + ?Sized>(
    resolver: &R,
    path: &Path,
    metadata: &Metadata,
    mut on_error: impl FnMut(&str, &str),
) -> EntryIdentity {
    let owner = resolver.owner_of(path, metadata).unwrap_or_else(|err| {
        on_error("owner", &err);
        UNKNOWN_LABEL.to_string()
    });
    let group = resolver.group_of(path, metadata).unwrap_or_else(|err| {
        on_error("group", &err);
        UNKNOWN_LABEL.to_string()
    });
    EntryIdentity { owner, group }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingGroupResolver;

    impl IdentityResolver for FailingGroupResolver {
        fn owner_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
            Ok("alice".to_string())
        }

        fn group_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
            Err("group database unavailable".to_string())
        }
    }

    #[test]
    fn failed_lookups_fall_back_to_unknown_and_report_the_error() {
        let path = std::env::temp_dir();
        let metadata = std::fs::metadata(&path).expect("temp dir metadata");
        let mut failures = Vec::new();

        let identity =
            resolve_identity_or_unknown(&FailingGroupResolver, &path, &metadata, |field, err| {
                failures.push(format!("{field}: {err}"))
            });

        assert_eq!(identity.owner, "alice");
        assert_eq!(identity.group, "Unknown");
        assert_eq!(failures, vec!["group: group database unavailable".to_string()]);
    }

    #[test]
    fn unknown_resolver_always_reports_unknown() {
        let path = std::env::temp_dir();
        let metadata = std::fs::metadata(&path).expect("temp dir metadata");
        let identity =
            resolve_identity_or_unknown(&UnknownIdentityResolver, &path, &metadata, |_, _| {
                panic!("unknown resolver never fails")
            });
        assert_eq!(
            identity,
            EntryIdentity {
                owner: "Unknown".to_string(),
                group: "Unknown".to_string(),
            }
        );
    }
}

//! OS-backed owner/group lookup.

use std::fs::Metadata;
use std::path::Path;

use platform_host::IdentityResolver;

#[derive(Debug, Clone, Copy, Default)]
/// Resolves owner and group names from the system user/group databases.
///
/// On non-unix platforms every lookup reports `"Unknown"`.
pub struct SystemIdentityResolver;

#[cfg(unix)]
impl IdentityResolver for SystemIdentityResolver {
    fn owner_of(&self, _path: &Path, metadata: &Metadata) -> Result<String, String> {
        use std::os::unix::fs::MetadataExt;

        let uid = metadata.uid();
        uzers::get_user_by_uid(uid)
            .map(|user| user.name().to_string_lossy().into_owned())
            .ok_or_else(|| format!("no user entry for uid {uid}"))
    }

    fn group_of(&self, _path: &Path, metadata: &Metadata) -> Result<String, String> {
        use std::os::unix::fs::MetadataExt;

        let gid = metadata.gid();
        uzers::get_group_by_gid(gid)
            .map(|group| group.name().to_string_lossy().into_owned())
            .ok_or_else(|| format!("no group entry for gid {gid}"))
    }
}

#[cfg(not(unix))]
impl IdentityResolver for SystemIdentityResolver {
    fn owner_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
        Ok(platform_host::UNKNOWN_LABEL.to_string())
    }

    fn group_of(&self, _path: &Path, _metadata: &Metadata) -> Result<String, String> {
        Ok(platform_host::UNKNOWN_LABEL.to_string())
    }
}

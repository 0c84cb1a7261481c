//! Content store addressing.
//!
//! Objects live at `base/oid[0:2]/oid[2:4]/oid`, the same fan-out git-lfs
//! uses for its local object cache.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Returned for object ids that cannot be mapped to a store path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOid {
    #[error("object id {0:?} is shorter than 4 characters")]
    TooShort(String),

    #[error("object id {0:?} must start with 4 ASCII characters")]
    NonAsciiPrefix(String),

    #[error("object id {0:?} contains a path separator or parent reference")]
    PathComponent(String),
}

/// Maps `oid` to its path inside the store rooted at `base`.
pub fn storage_path(base: &Path, oid: &str) -> Result<PathBuf, InvalidOid> {
    validate_oid(oid)?;
    Ok(base.join(&oid[0..2]).join(&oid[2..4]).join(oid))
}

/// Staging path for a download: `<staging_dir>/<oid>.tmp`.
pub fn download_temp_path(staging_dir: &Path, oid: &str) -> PathBuf {
    staging_dir.join(format!("{oid}.tmp"))
}

/// Temp path for an upload: the destination with `.tmp` appended.
pub fn upload_temp_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Removes a temp file left by a failed transfer. A missing file is fine.
pub(crate) fn remove_temp(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "failed to remove temp file: {e}"),
    }
}

fn validate_oid(oid: &str) -> Result<(), InvalidOid> {
    if oid.chars().count() < 4 {
        return Err(InvalidOid::TooShort(oid.to_string()));
    }
    if !oid.as_bytes()[..4].is_ascii() {
        return Err(InvalidOid::NonAsciiPrefix(oid.to_string()));
    }
    if oid.contains(['/', '\\']) || oid.contains("..") {
        return Err(InvalidOid::PathComponent(oid.to_string()));
    }
    Ok(())
}

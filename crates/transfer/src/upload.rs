//! Upload: place a working-tree file into the store.
//!
//! Data is written to `<dest>.tmp` and renamed over `<dest>` only once
//! complete, so the destination is never observed partially written.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use folderstore_protocol::ErrorCode;
use tracing::{debug, info};

use crate::OperationError;
use crate::chunked::{CopyProgress, copy_file_contents};
use crate::store::{remove_temp, storage_path, upload_temp_path};

/// How a successful upload ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The object was copied into the store.
    Stored,
    /// A file of the same size was already stored; nothing was copied.
    AlreadyStored,
}

/// Stores the file at `from_path` as object `oid` in the store at `base_dir`.
///
/// `size` is what the host announced; the copy length and the
/// already-stored check both use the size of `from_path` on disk.
pub fn store<F>(
    base_dir: &Path,
    oid: &str,
    size: i64,
    from_path: &Path,
    mut on_progress: F,
) -> Result<StoreOutcome, OperationError>
where
    F: FnMut(CopyProgress),
{
    let stat_from = fs::metadata(from_path).map_err(|e| {
        OperationError::new(
            ErrorCode::SourceStat,
            format!("Cannot stat {:?}: {e}", from_path.display()),
        )
    })?;
    let total = stat_from.len();
    if size != total as i64 {
        debug!(oid, requested = size, source = total, "size differs from request");
    }

    let dest_path = storage_path(base_dir, oid)
        .map_err(|e| OperationError::new(ErrorCode::DestinationPrepare, e.to_string()))?;

    // Same size counts as already stored; contents are not compared.
    if let Ok(stat_dest) = fs::metadata(&dest_path) {
        if stat_dest.len() == total {
            info!(oid, "skipping, already stored");
            on_progress(CopyProgress {
                total,
                so_far: total,
                since_last: total,
            });
            return Ok(StoreOutcome::AlreadyStored);
        }
    }

    if let Some(dir) = dest_path.parent() {
        fs::create_dir_all(dir).map_err(|e| {
            OperationError::new(
                ErrorCode::DestinationPrepare,
                format!("Cannot create dir {:?}: {e}", dir.display()),
            )
        })?;
    }

    let temp_path = upload_temp_path(&dest_path);
    match fs::remove_file(&temp_path) {
        Ok(()) => debug!(path = %temp_path.display(), "removed stale temp file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(OperationError::new(
                ErrorCode::DestinationPrepare,
                format!(
                    "Cannot remove existing temp file {:?}: {e}",
                    temp_path.display()
                ),
            ));
        }
    }

    let mut src = fs::File::open(from_path).map_err(|e| {
        OperationError::new(
            ErrorCode::SourceOpen,
            format!("Cannot read data from {:?}: {e}", from_path.display()),
        )
    })?;

    let mut dst = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| {
            OperationError::new(
                ErrorCode::TempCreate,
                format!(
                    "Cannot open temp file for writing {:?}: {e}",
                    temp_path.display()
                ),
            )
        })?;

    if let Err(e) = copy_file_contents(total, &mut src, &mut dst, on_progress)
        .and_then(|()| dst.sync_all())
    {
        drop(dst);
        remove_temp(&temp_path);
        return Err(OperationError::new(
            ErrorCode::UploadCopy,
            format!("Error writing temp file {:?}: {e}", temp_path.display()),
        ));
    }
    drop(dst);

    if let Err(e) = fs::rename(&temp_path, &dest_path) {
        remove_temp(&temp_path);
        return Err(OperationError::new(
            ErrorCode::Rename,
            format!("Error moving temp file to final location: {e}"),
        ));
    }

    debug!(oid, path = %dest_path.display(), bytes = total, "object stored");
    Ok(StoreOutcome::Stored)
}

//! Download: copy a stored object into the host's staging folder.
//!
//! The object is never written to the host's final location; the host moves
//! the staged file itself once `complete` arrives.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use folderstore_protocol::ErrorCode;
use tracing::debug;

use crate::OperationError;
use crate::chunked::{CopyProgress, copy_file_contents};
use crate::store::{download_temp_path, remove_temp, storage_path};

/// Copies object `oid` from the store at `base_dir` into `staging_dir`.
///
/// `size` is what the host announced; the copy length always comes from the
/// stored file. Returns the path of the staged file.
pub fn retrieve<F>(
    base_dir: &Path,
    staging_dir: &Path,
    oid: &str,
    size: i64,
    on_progress: F,
) -> Result<PathBuf, OperationError>
where
    F: FnMut(CopyProgress),
{
    let file_path = storage_path(base_dir, oid)
        .map_err(|e| OperationError::new(ErrorCode::ObjectNotFound, e.to_string()))?;

    let stat = fs::metadata(&file_path).map_err(|e| {
        OperationError::new(
            ErrorCode::ObjectNotFound,
            format!("Cannot stat {:?}: {e}", file_path.display()),
        )
    })?;

    if !stat.is_file() {
        return Err(OperationError::new(
            ErrorCode::StoreCorruption,
            format!(
                "Store corruption, {:?} is not a regular file",
                file_path.display()
            ),
        ));
    }

    if size != stat.len() as i64 {
        debug!(oid, requested = size, stored = stat.len(), "size differs from request");
    }

    // Staging lives next to the host's object cache so its final rename
    // stays on one volume.
    let dl_path = download_temp_path(staging_dir, oid);
    let mut dl_file = fs::create_dir_all(staging_dir)
        .and_then(|()| {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&dl_path)
        })
        .map_err(|e| {
            OperationError::new(
                ErrorCode::TempFile,
                format!("Error creating temp file for {:?}: {e}", file_path.display()),
            )
        })?;

    let mut src = match fs::File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            drop(dl_file);
            remove_temp(&dl_path);
            return Err(OperationError::new(
                ErrorCode::ObjectRead,
                format!("Cannot read data from {:?}: {e}", file_path.display()),
            ));
        }
    };

    if let Err(e) = copy_file_contents(stat.len(), &mut src, &mut dl_file, on_progress) {
        drop(dl_file);
        remove_temp(&dl_path);
        return Err(OperationError::new(
            ErrorCode::DownloadCopy,
            format!("Error copying file from {:?}: {e}", file_path.display()),
        ));
    }

    if let Err(e) = dl_file.sync_all() {
        drop(dl_file);
        remove_temp(&dl_path);
        return Err(OperationError::new(
            ErrorCode::TempFile,
            format!("Can't close temp file {:?}: {e}", dl_path.display()),
        ));
    }
    drop(dl_file);

    debug!(oid, path = %dl_path.display(), bytes = stat.len(), "object staged");
    Ok(dl_path)
}

//! Chunked, progress-reporting file transfers between a content-addressed
//! folder store and the host's working location.

mod chunked;
mod download;
mod store;
mod upload;

pub use chunked::{BLOCK_SIZE, CopyProgress, copy_file_contents};
pub use download::retrieve;
pub use store::{InvalidOid, download_temp_path, storage_path, upload_temp_path};
pub use upload::{StoreOutcome, store};

use folderstore_protocol::{ErrorCode, TransferError};

/// A failed transfer step: the wire code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct OperationError {
    pub code: ErrorCode,
    pub message: String,
}

impl OperationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<OperationError> for TransferError {
    fn from(err: OperationError) -> Self {
        TransferError::new(err.code, err.message)
    }
}

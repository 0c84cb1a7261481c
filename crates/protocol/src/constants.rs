use std::fmt;

/// Numeric error codes reported to the host in `TransferError.code`.
///
/// The integer values are part of the wire contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Download: the stored object is missing or cannot be stat'ed.
    ObjectNotFound = 3,
    /// Download: the stored object is not a regular file.
    StoreCorruption = 4,
    /// Download: the staging file cannot be created or closed.
    TempFile = 5,
    /// Download: the stored object cannot be opened for reading.
    ObjectRead = 6,
    /// Download: copying into the staging file failed.
    DownloadCopy = 7,
    /// Init: no base directory was configured.
    BaseDirNotSpecified = 9,
    /// Upload: the source file cannot be stat'ed.
    SourceStat = 13,
    /// Upload: the destination directory cannot be created, or a stale
    /// temp file cannot be removed.
    DestinationPrepare = 14,
    /// Upload: the source file cannot be opened for reading.
    SourceOpen = 15,
    /// Upload: the temp file cannot be created exclusively.
    TempCreate = 16,
    /// Upload: copying into the temp file failed.
    UploadCopy = 17,
    /// Upload: the temp file cannot be moved into place.
    Rename = 18,
}

impl ErrorCode {
    /// All codes, in wire order.
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::ObjectNotFound,
        ErrorCode::StoreCorruption,
        ErrorCode::TempFile,
        ErrorCode::ObjectRead,
        ErrorCode::DownloadCopy,
        ErrorCode::BaseDirNotSpecified,
        ErrorCode::SourceStat,
        ErrorCode::DestinationPrepare,
        ErrorCode::SourceOpen,
        ErrorCode::TempCreate,
        ErrorCode::UploadCopy,
        ErrorCode::Rename,
    ];

    /// Integer value sent on the wire.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when an integer does not map to any [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub i32);

impl TryFrom<i32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(UnknownErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Message sent with [`ErrorCode::BaseDirNotSpecified`].
pub const BASE_DIR_NOT_SPECIFIED_MSG: &str = "Base directory not specified, check config";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        let table: Vec<(ErrorCode, i32)> = vec![
            (ErrorCode::BaseDirNotSpecified, 9),
            (ErrorCode::ObjectNotFound, 3),
            (ErrorCode::StoreCorruption, 4),
            (ErrorCode::TempFile, 5),
            (ErrorCode::ObjectRead, 6),
            (ErrorCode::DownloadCopy, 7),
            (ErrorCode::SourceStat, 13),
            (ErrorCode::DestinationPrepare, 14),
            (ErrorCode::SourceOpen, 15),
            (ErrorCode::TempCreate, 16),
            (ErrorCode::UploadCopy, 17),
            (ErrorCode::Rename, 18),
        ];
        for (code, value) in table {
            assert_eq!(code.code(), value, "{code:?}");
            assert_eq!(i32::from(code), value);
        }
    }

    #[test]
    fn try_from_known_codes() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn try_from_unknown_code() {
        assert_eq!(ErrorCode::try_from(1), Err(UnknownErrorCode(1)));
        assert_eq!(ErrorCode::try_from(500), Err(UnknownErrorCode(500)));
    }

    #[test]
    fn display_is_numeric() {
        assert_eq!(ErrorCode::Rename.to_string(), "18");
    }
}

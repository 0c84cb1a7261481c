use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_DIR_NOT_SPECIFIED_MSG, ErrorCode};

/// Error details attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferError {
    pub code: i32,
    pub message: String,
}

impl TransferError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
        }
    }

    /// Typed view of `code`, `None` if the value is not a known code.
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.code).ok()
    }
}

/// Reply to an `init` request. An empty object means success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TransferError>,
}

impl InitResponse {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn base_dir_not_specified() -> Self {
        Self {
            error: Some(TransferError::new(
                ErrorCode::BaseDirNotSpecified,
                BASE_DIR_NOT_SPECIFIED_MSG,
            )),
        }
    }
}

/// Per-transfer response, discriminated by `event`.
///
/// A transfer produces zero or more `progress` messages followed by exactly
/// one `complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "event")]
pub enum Response {
    Complete {
        oid: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<TransferError>,
    },
    #[serde(rename_all = "camelCase")]
    Progress {
        oid: String,
        bytes_so_far: u64,
        bytes_since_last: u64,
    },
}

impl Response {
    /// Successful terminal message.
    pub fn complete(oid: impl Into<String>, path: Option<PathBuf>) -> Self {
        Response::Complete {
            oid: oid.into(),
            path,
            error: None,
        }
    }

    /// Failed terminal message.
    pub fn failed(oid: impl Into<String>, error: TransferError) -> Self {
        Response::Complete {
            oid: oid.into(),
            path: None,
            error: Some(error),
        }
    }

    pub fn progress(oid: impl Into<String>, bytes_so_far: u64, bytes_since_last: u64) -> Self {
        Response::Progress {
            oid: oid.into(),
            bytes_so_far,
            bytes_since_last,
        }
    }

    pub fn oid(&self) -> &str {
        match self {
            Response::Complete { oid, .. } | Response::Progress { oid, .. } => oid,
        }
    }

    /// Returns `true` for the message that ends a transfer.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Response::Complete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn init_ok_is_empty_object() {
        let json = serde_json::to_string(&InitResponse::ok()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn init_base_dir_error() {
        let value = serde_json::to_value(InitResponse::base_dir_not_specified()).unwrap();
        assert_eq!(
            value,
            json!({"error": {"code": 9, "message": "Base directory not specified, check config"}})
        );
    }

    #[test]
    fn complete_with_path() {
        let resp = Response::complete("abcd", Some(PathBuf::from("/repo/.git/lfs/tmp/abcd.tmp")));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"event": "complete", "oid": "abcd", "path": "/repo/.git/lfs/tmp/abcd.tmp"})
        );
    }

    #[test]
    fn complete_without_path_omits_fields() {
        let json = serde_json::to_string(&Response::complete("abcd", None)).unwrap();
        assert_eq!(json, r#"{"event":"complete","oid":"abcd"}"#);
    }

    #[test]
    fn failed_carries_error() {
        let resp = Response::failed("abcd", TransferError::new(ErrorCode::Rename, "boom"));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"event": "complete", "oid": "abcd", "error": {"code": 18, "message": "boom"}})
        );
        assert!(resp.is_terminal());
    }

    #[test]
    fn progress_uses_camel_case() {
        let json = serde_json::to_string(&Response::progress("abcd", 65536, 1024)).unwrap();
        assert_eq!(
            json,
            r#"{"event":"progress","oid":"abcd","bytesSoFar":65536,"bytesSinceLast":1024}"#
        );
    }

    #[test]
    fn transfer_error_typed_code() {
        let err = TransferError::new(ErrorCode::SourceStat, "missing");
        assert_eq!(err.error_code(), Some(ErrorCode::SourceStat));
        let unknown = TransferError {
            code: 42,
            message: String::new(),
        };
        assert_eq!(unknown.error_code(), None);
    }

    #[test]
    fn response_decodes_from_host_view() {
        let resp: Response = serde_json::from_str(
            r#"{"event":"progress","oid":"abcd","bytesSoFar":10,"bytesSinceLast":10}"#,
        )
        .unwrap();
        assert_eq!(resp.oid(), "abcd");
        assert!(!resp.is_terminal());
    }
}

//! Wire protocol for the git-lfs custom transfer agent.
//!
//! Requests arrive as one JSON object per line; every response is written
//! back as a single JSON line and flushed immediately.

pub mod codec;
pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use codec::{Sender, decode_request};
pub use constants::{ErrorCode, UnknownErrorCode};
pub use messages::{InitResponse, Response, TransferError};
pub use types::{Action, Event, Operation, Request};

/// Errors produced while encoding or decoding protocol lines.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Line codec: one JSON object per line in both directions.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::ProtocolError;
use crate::constants::ErrorCode;
use crate::messages::{InitResponse, Response, TransferError};
use crate::types::Request;

/// Decodes one input line into a [`Request`].
///
/// Trailing whitespace (including a `\r` left by CRLF input) is ignored.
pub fn decode_request(line: &str) -> Result<Request, ProtocolError> {
    Ok(serde_json::from_str(line.trim_end())?)
}

/// Serializes `msg` as a single JSON line terminated by `\n`.
pub fn encode_line<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtocolError> {
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    Ok(line)
}

/// Writes responses to the host.
///
/// Every message is written as one line and flushed before returning, so
/// the host can read it while the next request is still pending.
pub struct Sender<'a> {
    writer: Box<dyn Write + 'a>,
}

impl<'a> Sender<'a> {
    pub fn new(writer: impl Write + 'a) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Writes and flushes one message.
    pub fn send<T: Serialize>(&mut self, msg: &T) -> Result<(), ProtocolError> {
        let line = encode_line(msg)?;
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn send_init(&mut self, resp: &InitResponse) -> Result<(), ProtocolError> {
        self.send(resp)
    }

    pub fn send_progress(
        &mut self,
        oid: &str,
        bytes_so_far: u64,
        bytes_since_last: u64,
    ) -> Result<(), ProtocolError> {
        self.send(&Response::progress(oid, bytes_so_far, bytes_since_last))
    }

    pub fn send_complete(&mut self, oid: &str, path: Option<PathBuf>) -> Result<(), ProtocolError> {
        self.send(&Response::complete(oid, path))
    }

    /// Sends the terminal `complete` message carrying an error.
    pub fn send_transfer_error(
        &mut self,
        oid: &str,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<(), ProtocolError> {
        self.send(&Response::failed(oid, TransferError::new(code, message)))
    }
}

//! Handler trait for processing transfer requests.
//!
//! Implementors provide the storage logic while the server handles line
//! framing, decoding, and routing.

use folderstore_protocol::{InitResponse, ProtocolError, Request, Sender};

/// Trait for handling requests from the host.
///
/// Each method receives the response `sender` and the decoded request. A
/// transfer handler must send zero or more progress messages followed by
/// exactly one `complete` message. An `Err` means a response could not be
/// written; the server logs it and moves on to the next request.
pub trait Handler {
    /// Called for `init`. The default accepts unconditionally.
    fn on_init(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError> {
        let _ = req;
        sender.send_init(&InitResponse::ok())
    }

    /// Called for `download`.
    fn on_download(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError>;

    /// Called for `upload`.
    fn on_upload(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError>;

    /// Called once when `terminate` is received, before the loop stops.
    fn on_terminate(&self) {}
}

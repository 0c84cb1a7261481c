//! Agent request loop.
//!
//! Reads requests from a line-oriented input until end of input or a
//! `terminate` event. Requests are handled strictly one at a time.

use std::io::{BufRead, Write};

use folderstore_protocol::{Event, Request, Sender, decode_request};
use tracing::{debug, error, info, warn};

use crate::ServerError;
use crate::handler::Handler;

/// Why [`AgentServer::serve`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// A `terminate` request was received.
    Terminated,
    /// The input stream ended.
    EndOfInput,
}

/// The agent request loop.
///
/// Dispatches each decoded request to the provided [`Handler`].
pub struct AgentServer<H: Handler> {
    handler: H,
}

impl<H: Handler> AgentServer<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Serves requests from `input`, writing responses to `output`.
    ///
    /// Malformed lines are logged and skipped. Only a failure to read
    /// `input` ends the loop with an error.
    pub fn serve<R, W>(&self, mut input: R, output: W) -> Result<Shutdown, ServerError>
    where
        R: BufRead,
        W: Write,
    {
        let mut sender = Sender::new(output);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("input closed");
                return Ok(Shutdown::EndOfInput);
            }

            let req = match std::str::from_utf8(&buf)
                .map_err(|e| e.to_string())
                .and_then(|line| decode_request(line).map_err(|e| e.to_string()))
            {
                Ok(req) => req,
                Err(e) => {
                    warn!(
                        line = %String::from_utf8_lossy(&buf).trim_end(),
                        "unable to parse request: {e}"
                    );
                    continue;
                }
            };

            if self.dispatch(&mut sender, &req) {
                return Ok(Shutdown::Terminated);
            }
        }
    }

    /// Routes one request. Returns `true` when the loop should stop.
    fn dispatch(&self, sender: &mut Sender<'_>, req: &Request) -> bool {
        let result = match req.event {
            Event::Init => self.handler.on_init(sender, req),
            Event::Download => {
                info!(oid = req.oid(), "received download request");
                self.handler.on_download(sender, req)
            }
            Event::Upload => {
                info!(oid = req.oid(), "received upload request");
                self.handler.on_upload(sender, req)
            }
            Event::Terminate => {
                info!("terminating gracefully");
                self.handler.on_terminate();
                return true;
            }
            Event::Unknown => {
                debug!("ignoring unknown event");
                return false;
            }
        };

        if let Err(e) = result {
            error!(event = ?req.event, oid = req.oid(), "unable to send response: {e}");
        }
        false
    }
}

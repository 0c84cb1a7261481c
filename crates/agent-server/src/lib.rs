//! Request loop for the git-lfs custom transfer agent.
//!
//! Reads one JSON request per line, dispatches it to a [`Handler`], and
//! keeps the response discipline: every response is one flushed line, and
//! a request is fully answered before the next line is read.

mod handler;
mod server;

pub use handler::Handler;
pub use server::{AgentServer, Shutdown};

/// Errors produced by the agent server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error reading requests: {0}")]
    Io(#[from] std::io::Error),
}

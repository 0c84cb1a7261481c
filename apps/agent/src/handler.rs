//! Folder-store request handler.

use std::path::{Path, PathBuf};

use folderstore_agent_server::Handler;
use folderstore_protocol::constants::BASE_DIR_NOT_SPECIFIED_MSG;
use folderstore_protocol::{ErrorCode, InitResponse, ProtocolError, Request, Response, Sender};
use folderstore_transfer::{CopyProgress, OperationError, StoreOutcome, retrieve, store};
use tracing::{debug, info, warn};

/// Serves transfers against a folder store.
///
/// Built once at startup; both paths stay fixed for the whole session.
pub struct FolderStoreHandler {
    base_dir: Option<PathBuf>,
    git_dir: PathBuf,
}

impl FolderStoreHandler {
    pub fn new(base_dir: Option<PathBuf>, git_dir: PathBuf) -> Self {
        Self { base_dir, git_dir }
    }

    /// Download staging folder: `<git dir>/lfs/tmp`.
    fn staging_dir(&self) -> PathBuf {
        self.git_dir.join("lfs").join("tmp")
    }

    /// The store root, or the terminal error for a transfer without one.
    fn base_dir_or_reply(
        &self,
        sender: &mut Sender<'_>,
        oid: &str,
    ) -> Result<Option<&Path>, ProtocolError> {
        match &self.base_dir {
            Some(dir) => Ok(Some(dir.as_path())),
            None => {
                warn!(oid, "transfer requested without a base directory");
                sender.send_transfer_error(
                    oid,
                    ErrorCode::BaseDirNotSpecified,
                    BASE_DIR_NOT_SPECIFIED_MSG,
                )?;
                Ok(None)
            }
        }
    }
}

/// Streams copy progress to the host. Progress is best effort.
fn send_progress(sender: &mut Sender<'_>, oid: &str, p: CopyProgress) {
    if let Err(e) = sender.send_progress(oid, p.so_far, p.since_last) {
        warn!(oid, "unable to send progress: {e}");
    }
}

fn send_failure(
    sender: &mut Sender<'_>,
    oid: &str,
    err: OperationError,
) -> Result<(), ProtocolError> {
    warn!(oid, code = %err.code, "{}", err.message);
    sender.send(&Response::failed(oid, err.into()))
}

fn log_action(req: &Request) {
    if let Some(action) = &req.action {
        debug!(oid = req.oid(), href = %action.href, "request action");
    }
}

impl Handler for FolderStoreHandler {
    fn on_init(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError> {
        let Some(base_dir) = &self.base_dir else {
            warn!("{BASE_DIR_NOT_SPECIFIED_MSG}");
            return sender.send_init(&InitResponse::base_dir_not_specified());
        };

        info!(
            operation = req.operation.map(|op| op.as_str()).unwrap_or("unknown"),
            remote = req.remote.as_deref().unwrap_or_default(),
            concurrent = req.concurrent.unwrap_or(false),
            concurrent_transfers = req.concurrenttransfers.unwrap_or(0),
            base_dir = %base_dir.display(),
            "initialised lfs-folderstore custom adapter"
        );
        sender.send_init(&InitResponse::ok())
    }

    fn on_download(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError> {
        let oid = req.oid();
        log_action(req);
        let Some(base_dir) = self.base_dir_or_reply(sender, oid)? else {
            return Ok(());
        };

        let result = retrieve(base_dir, &self.staging_dir(), oid, req.size(), |p| {
            send_progress(sender, oid, p)
        });
        match result {
            Ok(path) => sender.send_complete(oid, Some(path)),
            Err(err) => send_failure(sender, oid, err),
        }
    }

    fn on_upload(&self, sender: &mut Sender<'_>, req: &Request) -> Result<(), ProtocolError> {
        let oid = req.oid();
        log_action(req);
        let Some(base_dir) = self.base_dir_or_reply(sender, oid)? else {
            return Ok(());
        };

        let from_path = req.path.as_deref().unwrap_or(Path::new(""));
        let result = store(base_dir, oid, req.size(), from_path, |p| {
            send_progress(sender, oid, p)
        });
        match result {
            Ok(StoreOutcome::Stored | StoreOutcome::AlreadyStored) => sender.send_complete(oid, None),
            Err(err) => send_failure(sender, oid, err),
        }
    }
}

//! lfs-folderstore entry point.
//!
//! git-lfs starts this binary as a custom transfer agent and talks to it
//! over stdin/stdout. Diagnostics go to stderr only.

mod config;
mod git;
mod handler;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folderstore_agent_server::AgentServer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handler::FolderStoreHandler;

/// git-lfs custom transfer agent backed by a plain folder.
#[derive(Parser)]
#[command(name = "lfs-folderstore", version)]
struct Cli {
    /// Folder holding the shared object store.
    #[arg(env = "LFS_FOLDERSTORE_BASEDIR")]
    base_dir: Option<String>,

    /// Optional TOML config file (`base_dir`, `log_level`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.base_dir.as_deref(), cli.config.as_deref())?;

    // stdout carries protocol responses; logs must stay on stderr.
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting lfs-folderstore");

    let git_dir = git::git_dir().context("unable to retrieve git dir")?;
    tracing::debug!(git_dir = %git_dir.display(), "resolved git dir");

    let server = AgentServer::new(FolderStoreHandler::new(config.base_dir(), git_dir));
    let shutdown = server.serve(io::stdin().lock(), io::stdout().lock())?;

    tracing::debug!(?shutdown, "agent shut down cleanly");
    Ok(())
}
